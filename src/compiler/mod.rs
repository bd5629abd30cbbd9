//! 编译模块：将规则定义编译为可执行的正则 / 查询模式
pub mod pattern;
pub mod query_path;
pub mod compiler;

pub use self::pattern::{Pattern, PatternGroup, QueryPattern, RuleCatalog, RuleSet, TextPattern};
pub use self::query_path::{PathSegment, QueryPath};
pub use self::compiler::RuleCompiler;
