//! 结构化查询求值器：作用于已解析的 JSON 树，只读、无副作用

use serde_json::Value;
use tracing::trace;

use super::record::CaptureRecord;
use crate::compiler::QueryPattern;
use crate::utils::CaptureExtractor;

/// 记录中保存 import map 键名的字段
pub const ALIAS_FIELD: &str = "alias";

/// 结构化查询求值器
pub struct QueryEvaluator;

impl QueryEvaluator {
    /// 路径选中的每个对象视为 alias -> specifier 映射，按文档键序逐项匹配
    ///
    /// 同一个包被多个 alias 引用时（如 `preact` 与 `preact/`）每个 alias 各产生一条记录。
    /// 形状不符（非对象、非字符串值）只会让结果变少，不会报错。
    pub fn evaluate(pattern: &QueryPattern, document: &Value) -> Vec<CaptureRecord> {
        let mut records = Vec::new();

        for node in pattern.path.select(document) {
            let Value::Object(map) = node else {
                continue;
            };
            for (alias, value) in map {
                let Value::String(specifier) = value else {
                    continue;
                };
                let Some(captures) = pattern.specifier.captures(specifier) else {
                    continue;
                };
                let mut record = CaptureExtractor::extract(&pattern.specifier, &captures);
                record.insert_missing(ALIAS_FIELD, alias);
                records.push(record);
            }
        }

        trace!("JSON查询：{} 命中{}条", pattern.path, records.len());
        records
    }
}
