//! 规则模块：负责规则的数据模型、内置规则库与规则文件加载
pub mod model;
pub mod builtin;
pub mod loader;

// 导出核心接口
pub use self::model::{LocatorKind, NameLayout, QueryDef, RuleCatalogDef, RuleSetDef};
pub use self::builtin::{builtin_catalog, BUILTIN_CATALOG};
pub use self::loader::RuleLoader;
