//! 规则加载管理器
//! 负责从本地 JSON 文件读取规则库定义（同步 / tokio 异步两种入口）

use std::path::Path;
use tracing::debug;

use super::builtin::BUILTIN_CATALOG;
use super::model::RuleCatalogDef;
use crate::config::GlobalConfig;
use crate::error::{DeprefError, DeprefResult};

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 按配置加载规则库定义：未指定文件时使用内置规则库
    pub fn load(config: &GlobalConfig) -> DeprefResult<RuleCatalogDef> {
        match &config.catalog_path {
            Some(path) => Self::load_file(path),
            None => {
                debug!("使用内置规则库，规则集数：{}", BUILTIN_CATALOG.rule_sets.len());
                Ok(BUILTIN_CATALOG.clone())
            }
        }
    }

    /// 同步读取规则文件
    pub fn load_file(path: &Path) -> DeprefResult<RuleCatalogDef> {
        let data = std::fs::read(path).map_err(|e| {
            DeprefError::RuleLoadError(format!("读取{}失败：{}", path.display(), e))
        })?;
        Self::parse(path, &data)
    }

    /// 异步读取规则文件
    pub async fn load_file_async(path: &Path) -> DeprefResult<RuleCatalogDef> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            DeprefError::RuleLoadError(format!("读取{}失败：{}", path.display(), e))
        })?;
        Self::parse(path, &data)
    }

    fn parse(path: &Path, data: &[u8]) -> DeprefResult<RuleCatalogDef> {
        let catalog: RuleCatalogDef = serde_json::from_slice(data)?;
        debug!(
            "规则文件解析成功：{}，规则集数：{}",
            path.display(),
            catalog.rule_sets.len()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::rule::LocatorKind;
    use std::io::Write;

    const CATALOG_JSON: &str = r#"{
        "ruleSets": [
            {
                "kind": "cdn-mirror",
                "text": ["https://x\\.nest\\.land/(?P<depName>[\\w.-]+)@(?P<currentValue>[^/\"]+)"]
            }
        ]
    }"#;

    fn write_catalog(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_builtin_when_no_path() {
        let catalog = RuleLoader::load(&ConfigManager::get_default()).unwrap();
        assert_eq!(catalog, *BUILTIN_CATALOG);
    }

    #[test]
    fn test_load_file() {
        let file = write_catalog(CATALOG_JSON);
        let config = ConfigManager::custom()
            .catalog_path(file.path().to_path_buf())
            .build();

        let catalog = RuleLoader::load(&config).unwrap();
        assert_eq!(catalog.rule_sets.len(), 1);
        assert_eq!(catalog.rule_sets[0].kind, LocatorKind::CdnMirror);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleLoader::load_file(Path::new("/nonexistent/depref-catalog.json")).unwrap_err();
        assert!(matches!(err, DeprefError::RuleLoadError(_)));
    }

    #[test]
    fn test_load_malformed_file() {
        let file = write_catalog("{ \"ruleSets\": [ { \"kind\": \"ftp\" } ] }");
        let err = RuleLoader::load_file(file.path()).unwrap_err();
        assert!(matches!(err, DeprefError::JsonError(_)));
    }

    #[tokio::test]
    async fn test_load_file_async() {
        let file = write_catalog(CATALOG_JSON);
        let catalog = RuleLoader::load_file_async(file.path()).await.unwrap();
        assert_eq!(catalog.rule_sets[0].text.len(), 1);
    }
}
