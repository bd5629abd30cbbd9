//! 提取过程中的数据结构：文档、捕获记录、最终引用结果

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rule::LocatorKind;

/// 文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Json,
    Text,
}

impl DocumentKind {
    /// 按扩展名判断：.json / .jsonc 视为 import map（JSONC 经 `parse_jsonc` 解析），其余视为源码文本
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("jsonc") => {
                DocumentKind::Json
            }
            _ => DocumentKind::Text,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Json => write!(f, "json"),
            DocumentKind::Text => write!(f, "text"),
        }
    }
}

/// 待提取文档：原始文本，或已解析的 JSON 树
#[derive(Debug, Clone, Copy)]
pub enum Document<'a> {
    Text(&'a str),
    Json(&'a Value),
}

impl Document<'_> {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Text(_) => DocumentKind::Text,
            Document::Json(_) => DocumentKind::Json,
        }
    }
}

/// 单次匹配产生的捕获记录：字段名 -> 捕获文本
///
/// 除 `depName` / `currentValue` 外，`owner`、`repo`、`scope`、`pkg`、`alias`
/// 等字段只在归一化阶段临时存在，不会出现在对外结果里。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureRecord {
    fields: BTreeMap<String, String>,
}

impl CaptureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// 仅在字段不存在时写入（不覆盖模式自身的同名捕获）
    pub fn insert_missing(&mut self, name: &str, value: &str) {
        self.fields
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// 空字符串视为缺失
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CaptureRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// 对外的提取结果
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedReference {
    pub dependency_name: String,
    pub current_value: String,
    pub locator_kind: LocatorKind,
}

impl ExtractedReference {
    /// 下游应查询的数据源
    pub fn datasource(&self) -> &'static str {
        self.locator_kind.datasource()
    }
}

// ======== 为 ExtractedReference 实现 Display trait（用于 CLI 输出） ========
impl fmt::Display for ExtractedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} ({})",
            self.dependency_name, self.current_value, self.locator_kind
        )
    }
}
