//! 全局错误类型定义
//! 只有配置/调用方错误会以错误形式传播；文档内容导致的"无匹配"一律表现为结果变少

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;

use crate::engine::DocumentKind;
use crate::rule::LocatorKind;

#[derive(Error, Debug)]
pub enum DeprefError {
    // 规则编译相关错误（规则库构建期致命，提取期不会出现）
    #[error("规则集{kind}的模式编译失败：{pattern}：{source}")]
    PatternCompileError {
        kind: LocatorKind,
        pattern: String,
        #[source]
        source: RegexError,
    },
    #[error("规则集{kind}的查询路径无效：{path:?}：{reason}")]
    InvalidQueryPath {
        kind: LocatorKind,
        path: String,
        reason: String,
    },
    #[error("规则集{0}未定义任何模式")]
    EmptyRuleSet(LocatorKind),
    #[error("规则集{0}重复定义")]
    DuplicateRuleSet(LocatorKind),

    // 提取相关错误（可恢复，调用方可以换一个规则集或跳过）
    #[error("规则集{kind}不支持{document}文档")]
    UnsupportedDocumentKind {
        kind: LocatorKind,
        document: DocumentKind,
    },
    #[error("规则库中不存在规则集{0}")]
    UnknownRuleSet(LocatorKind),
    #[error("提取器未初始化")]
    ExtractorNotInitialized,

    // 规则加载相关错误
    #[error("规则加载失败：{0}")]
    RuleLoadError(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
}

// 全局Result类型
pub type DeprefResult<T> = Result<T, DeprefError>;
