//! 捕获字段提取工具模块
//! 负责把正则捕获结果转换为按组名索引的捕获记录

use regex::{Captures, Regex};

use crate::engine::CaptureRecord;

/// 捕获字段提取工具类
pub struct CaptureExtractor;

impl CaptureExtractor {
    /// 收集正则声明的全部命名捕获组
    ///
    /// 未参与匹配的可选分组不会写入记录；参与匹配但内容为空的分组写入空字符串，
    /// 由归一化阶段决定是否视为缺失。
    pub fn extract(regex: &Regex, captures: &Captures) -> CaptureRecord {
        regex
            .capture_names()
            .flatten()
            .filter_map(|name| captures.name(name).map(|m| (name, m.as_str())))
            .collect()
    }
}
