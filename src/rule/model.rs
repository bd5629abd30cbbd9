//! 规则数据模型定义
//! 仅存储规则数据，无任何匹配逻辑，支持序列化/反序列化

use std::fmt;
use serde::{Deserialize, Serialize};

/// 定位约定（模块托管方式），每个规则集固定一个
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocatorKind {
    /// 标准库托管（deno.land/std）
    StandardLibrary,
    /// 模块注册中心（deno.land/x）
    RegistryModule,
    /// npm 兼容的 thin URL（npm: 协议 / esm.sh / unpkg / skypack）
    ThinUrl,
    /// CDN 镜像（x.nest.land）
    CdnMirror,
    /// 带 scope 的注册中心（jsr）
    ScopedRegistry,
    /// 基于源码仓库 tag 的托管（raw.githubusercontent.com 等）
    TagBasedSource,
}

impl LocatorKind {
    pub const ALL: [LocatorKind; 6] = [
        LocatorKind::StandardLibrary,
        LocatorKind::RegistryModule,
        LocatorKind::ThinUrl,
        LocatorKind::CdnMirror,
        LocatorKind::ScopedRegistry,
        LocatorKind::TagBasedSource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorKind::StandardLibrary => "standard-library",
            LocatorKind::RegistryModule => "registry-module",
            LocatorKind::ThinUrl => "thin-url",
            LocatorKind::CdnMirror => "cdn-mirror",
            LocatorKind::ScopedRegistry => "scoped-registry",
            LocatorKind::TagBasedSource => "tag-based-source",
        }
    }

    /// 下游更新器应查询的上游数据源（仅作路由提示）
    pub fn datasource(&self) -> &'static str {
        match self {
            LocatorKind::StandardLibrary | LocatorKind::RegistryModule | LocatorKind::CdnMirror => "deno",
            LocatorKind::ThinUrl => "npm",
            LocatorKind::ScopedRegistry => "jsr",
            LocatorKind::TagBasedSource => "github-tags",
        }
    }

    /// 从字符串解析（CLI 参数使用）
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 依赖名推导方式（归一化阶段按规则集固定布局拼装）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameLayout {
    /// 直接使用 depName 捕获
    #[default]
    Verbatim,
    /// depName 必须是带 host 的绝对 URL，输出规范化序列化结果
    Url,
    /// owner + "/" + repo
    OwnerRepo,
    /// 有 scope 时 scope + "/" + pkg，否则 pkg
    ScopedPackage,
    /// 同 ScopedPackage，但 scope 缺失时丢弃
    RequiredScope,
}

/// JSON 结构化查询定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDef {
    /// JSON Pointer 路径，段可以为通配符 `*`
    pub path: String,
    /// 作用于每个 specifier 字符串的正则（命名捕获组即捕获字段）
    pub specifier: String,
}

impl QueryDef {
    pub fn new(path: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            specifier: specifier.into(),
        }
    }
}

/// 单个托管约定的规则集定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetDef {
    pub kind: LocatorKind,
    #[serde(default)]
    pub name_layout: NameLayout,
    /// JSON 文档（import map）查询组
    #[serde(default)]
    pub json: Vec<QueryDef>,
    /// 文本文档正则组
    #[serde(default)]
    pub text: Vec<String>,
}

/// 完整规则库定义
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCatalogDef {
    pub rule_sets: Vec<RuleSetDef>,
}
