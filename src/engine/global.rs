//! 全局提取器单例管理
use once_cell::sync::OnceCell;

use super::extractor::ReferenceExtractor;
use super::record::{Document, ExtractedReference};
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::{DeprefError, DeprefResult};
use crate::rule::LocatorKind;

/// 全局提取器实例
static GLOBAL_EXTRACTOR: OnceCell<ReferenceExtractor> = OnceCell::new();

/// 初始化全局提取器（默认配置，内置规则库）
pub fn init_extractor() -> DeprefResult<()> {
    init_extractor_with_config(ConfigManager::get_default())
}

/// 带自定义配置初始化全局提取器，已初始化时直接返回
pub fn init_extractor_with_config(config: GlobalConfig) -> DeprefResult<()> {
    GLOBAL_EXTRACTOR.get_or_try_init(|| ReferenceExtractor::from_config(&config))?;
    Ok(())
}

/// 获取全局提取器
pub(crate) fn get_global_extractor() -> DeprefResult<&'static ReferenceExtractor> {
    GLOBAL_EXTRACTOR
        .get()
        .ok_or(DeprefError::ExtractorNotInitialized)
}

pub fn extract_references(kind: LocatorKind, document: &Document) -> DeprefResult<Vec<ExtractedReference>> {
    get_global_extractor()?.extract(kind, document)
}

pub fn extract_all_references(document: &Document) -> DeprefResult<Vec<ExtractedReference>> {
    Ok(get_global_extractor()?.extract_all(document))
}
