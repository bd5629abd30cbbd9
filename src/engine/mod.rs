//! 提取模块：文本扫描、结构化查询、聚合、归一化与对外提取接口
pub mod record;
pub mod scanner;
pub mod query;
pub mod aggregator;
pub mod normalizer;
pub mod extractor;
pub mod global;

// 导出核心接口
pub use self::record::{CaptureRecord, Document, DocumentKind, ExtractedReference};
pub use self::scanner::TextScanner;
pub use self::query::QueryEvaluator;
pub use self::aggregator::MatchAggregator;
pub use self::normalizer::{ConventionContext, Normalizer};
pub use self::extractor::ReferenceExtractor;
pub use self::global::{
    extract_all_references, extract_references, init_extractor, init_extractor_with_config,
};
