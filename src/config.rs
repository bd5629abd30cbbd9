//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

use crate::rule::LocatorKind;

/// 全局配置
#[derive(Debug, Clone, Default)]
pub struct GlobalConfig {
    // 规则文件路径（None 表示使用内置规则库）
    pub catalog_path: Option<PathBuf>,
    // 仅保留这些规则集（None 表示全部）
    pub kinds: Option<Vec<LocatorKind>>,
    // 是否启用详细日志
    pub verbose: bool,
}

impl GlobalConfig {
    /// 规则集是否被配置启用
    pub fn is_kind_enabled(&self, kind: LocatorKind) -> bool {
        self.kinds.as_ref().map_or(true, |kinds| kinds.contains(&kind))
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog_path(mut self, path: PathBuf) -> Self {
        self.config.catalog_path = Some(path);
        self
    }

    pub fn kinds(mut self, kinds: Vec<LocatorKind>) -> Self {
        self.config.kinds = Some(kinds);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
