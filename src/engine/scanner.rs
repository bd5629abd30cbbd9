//! 文本扫描器：对整份文本做全局、多行扫描

use tracing::trace;

use super::record::CaptureRecord;
use crate::compiler::TextPattern;
use crate::utils::CaptureExtractor;

/// 文本扫描器
pub struct TextScanner;

impl TextScanner {
    /// 找出全部不重叠的匹配，每处匹配产生一条记录
    ///
    /// 空记录在这里不做过滤，交给聚合器处理。
    pub fn scan(pattern: &TextPattern, text: &str) -> Vec<CaptureRecord> {
        let records: Vec<CaptureRecord> = pattern
            .regex
            .captures_iter(text)
            .map(|captures| CaptureExtractor::extract(&pattern.regex, &captures))
            .collect();

        trace!("文本扫描：匹配{}处，规则={}", records.len(), pattern.regex.as_str());
        records
    }
}
