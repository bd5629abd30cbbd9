//! depref - 基于规则的依赖引用提取引擎（import map / 模块源码）

// 导出全局错误类型
pub use self::error::{DeprefError, DeprefResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    LocatorKind, NameLayout, QueryDef, RuleSetDef, RuleCatalogDef, RuleLoader,
    BUILTIN_CATALOG, builtin_catalog,
};

// 导出编译模块核心接口
pub use self::compiler::{
    Pattern, PatternGroup, QueryPattern, QueryPath, RuleCatalog, RuleCompiler, RuleSet, TextPattern,
};

// 导出工具模块核心接口
pub use self::utils::{parse_jsonc, strip_jsonc, CaptureExtractor};

// 导出提取模块核心接口（含全局单例的简化接口）
pub use self::engine::{
    CaptureRecord,
    ConventionContext,
    Document,
    DocumentKind,
    ExtractedReference,
    MatchAggregator,
    Normalizer,
    QueryEvaluator,
    ReferenceExtractor,
    TextScanner,
    init_extractor,
    init_extractor_with_config,
    extract_references,
    extract_all_references,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod utils;
pub mod compiler;
pub mod engine;
