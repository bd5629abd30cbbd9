//! 编译后模式模型
//! 规则库构建完成后只读，可在任意数量的并发提取调用之间共享

use std::sync::Arc;
use regex::Regex;

use super::query_path::QueryPath;
use crate::engine::DocumentKind;
use crate::rule::{LocatorKind, NameLayout};

/// 文本模式：作用于原始文本的正则
#[derive(Debug, Clone)]
pub struct TextPattern {
    pub regex: Regex,
}

/// 查询模式：JSON 路径选中 import map，再对每个 specifier 跑正则
#[derive(Debug, Clone)]
pub struct QueryPattern {
    pub path: QueryPath,
    pub specifier: Regex,
}

/// 统一的模式抽象（聚合器只针对此枚举编写一次）
#[derive(Debug, Clone)]
pub enum Pattern {
    Text(TextPattern),
    Query(QueryPattern),
}

impl Pattern {
    /// 模式适用的文档类型
    pub fn document_kind(&self) -> DocumentKind {
        match self {
            Pattern::Text(_) => DocumentKind::Text,
            Pattern::Query(_) => DocumentKind::Json,
        }
    }

    /// 规则描述（用于日志输出）
    pub fn describe(&self) -> String {
        match self {
            Pattern::Text(p) => p.regex.as_str().to_string(),
            Pattern::Query(q) => format!("{} => {}", q.path, q.specifier.as_str()),
        }
    }
}

/// 模式组：有序，但顺序不代表优先级，所有模式都会执行并取并集
#[derive(Debug, Clone, Default)]
pub struct PatternGroup {
    pub patterns: Vec<Pattern>,
}

impl PatternGroup {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// 编译后的规则集（一个托管约定）
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub kind: LocatorKind,
    pub name_layout: NameLayout,
    pub json: PatternGroup,
    pub text: PatternGroup,
}

impl RuleSet {
    /// 按文档类型选择模式组，组为空时返回 None
    pub fn group(&self, document: DocumentKind) -> Option<&PatternGroup> {
        let group = match document {
            DocumentKind::Json => &self.json,
            DocumentKind::Text => &self.text,
        };
        (!group.is_empty()).then_some(group)
    }

    pub fn supports(&self, document: DocumentKind) -> bool {
        self.group(document).is_some()
    }
}

/// 编译后的规则库
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    pub rule_sets: Vec<Arc<RuleSet>>,
}

impl RuleCatalog {
    pub fn get(&self, kind: LocatorKind) -> Option<&Arc<RuleSet>> {
        self.rule_sets.iter().find(|rule_set| rule_set.kind == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = LocatorKind> + '_ {
        self.rule_sets.iter().map(|rule_set| rule_set.kind)
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }
}
