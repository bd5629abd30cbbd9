//! 工具模块
pub mod capture_extractor;
pub mod jsonc;

pub use self::capture_extractor::CaptureExtractor;
pub use self::jsonc::{parse_jsonc, strip_jsonc};
