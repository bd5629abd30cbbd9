//! 匹配聚合器：执行模式组内全部模式，按模式顺序拼接结果

use tracing::trace;

use super::query::QueryEvaluator;
use super::record::{CaptureRecord, Document};
use super::scanner::TextScanner;
use crate::compiler::{Pattern, PatternGroup};

/// 匹配聚合器
pub struct MatchAggregator;

impl MatchAggregator {
    /// 模式之间是并集关系，不短路、不跨模式去重；
    /// 先按模式顺序、再按每个模式内的出现顺序输出
    pub fn aggregate(group: &PatternGroup, document: &Document) -> Vec<CaptureRecord> {
        let mut aggregated = Vec::new();

        for (index, pattern) in group.patterns.iter().enumerate() {
            let records: Vec<CaptureRecord> = Self::run_pattern(pattern, document)
                .into_iter()
                .filter(|record| !record.is_empty())
                .collect();

            if records.is_empty() {
                continue;
            }
            trace!("模式#{}产出{}条记录", index, records.len());
            aggregated.extend(records);
        }

        aggregated
    }

    /// 按模式类型分派；类型与文档不符的模式不产生记录
    fn run_pattern(pattern: &Pattern, document: &Document) -> Vec<CaptureRecord> {
        match (pattern, document) {
            (Pattern::Text(text_pattern), Document::Text(text)) => TextScanner::scan(text_pattern, text),
            (Pattern::Query(query_pattern), Document::Json(value)) => {
                QueryEvaluator::evaluate(query_pattern, value)
            }
            _ => Vec::new(),
        }
    }
}
