//! 提取器核心：规则集选择 -> 聚合 -> 归一化，无状态流水线
use std::sync::Arc;
use tracing::debug;

use super::aggregator::MatchAggregator;
use super::normalizer::{ConventionContext, Normalizer};
use super::record::{Document, ExtractedReference};
use crate::compiler::{RuleCatalog, RuleCompiler, RuleSet};
use crate::config::GlobalConfig;
use crate::error::{DeprefError, DeprefResult};
use crate::rule::{LocatorKind, RuleLoader, BUILTIN_CATALOG};

/// 依赖引用提取器
///
/// 只持有只读的编译后规则库，可以 clone 后在多个线程间并发调用。
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    catalog: Arc<RuleCatalog>,
}

impl ReferenceExtractor {
    /// 使用已编译的规则库创建提取器
    pub fn new(catalog: RuleCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// 使用内置规则库创建提取器
    pub fn builtin() -> DeprefResult<Self> {
        Ok(Self::new(RuleCompiler::compile(&BUILTIN_CATALOG)?))
    }

    /// 按配置加载并编译规则库
    pub fn from_config(config: &GlobalConfig) -> DeprefResult<Self> {
        let catalog_def = RuleLoader::load(config)?;
        let catalog = RuleCompiler::compile_with_config(&catalog_def, config)?;
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// 用指定托管约定的规则集提取
    pub fn extract(&self, kind: LocatorKind, document: &Document) -> DeprefResult<Vec<ExtractedReference>> {
        let rule_set = self
            .catalog
            .get(kind)
            .ok_or(DeprefError::UnknownRuleSet(kind))?;
        Self::extract_with(rule_set, document)
    }

    /// 用规则库中所有支持该文档类型的规则集提取，按规则库顺序拼接
    pub fn extract_all(&self, document: &Document) -> Vec<ExtractedReference> {
        let document_kind = document.kind();
        let references: Vec<ExtractedReference> = self
            .catalog
            .rule_sets
            .iter()
            .filter(|rule_set| rule_set.supports(document_kind))
            .filter_map(|rule_set| Self::extract_with(rule_set, document).ok())
            .flatten()
            .collect();

        debug!("全部规则集提取完成：文档类型={}，引用{}条", document_kind, references.len());
        references
    }

    /// 单个规则集的提取流水线
    ///
    /// 结果顺序即聚合顺序，不排序、不去重：同一引用出现在多处时每处各算一条。
    pub fn extract_with(rule_set: &RuleSet, document: &Document) -> DeprefResult<Vec<ExtractedReference>> {
        let document_kind = document.kind();
        let group = rule_set
            .group(document_kind)
            .ok_or(DeprefError::UnsupportedDocumentKind {
                kind: rule_set.kind,
                document: document_kind,
            })?;

        let context = ConventionContext::from(rule_set);
        let records = MatchAggregator::aggregate(group, document);
        let total = records.len();
        let references: Vec<ExtractedReference> = records
            .iter()
            .filter_map(|record| Normalizer::normalize(record, context))
            .collect();

        debug!(
            "规则集{}提取完成：原始记录{}条，有效引用{}条",
            rule_set.kind,
            total,
            references.len()
        );
        Ok(references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DocumentKind;
    use crate::rule::{NameLayout, RuleCatalogDef, RuleSetDef};
    use serde_json::json;

    fn text_only_extractor() -> ReferenceExtractor {
        let def = RuleCatalogDef {
            rule_sets: vec![RuleSetDef {
                kind: LocatorKind::CdnMirror,
                name_layout: NameLayout::Verbatim,
                json: Vec::new(),
                text: vec![r"https://x\.nest\.land/(?P<depName>[\w.-]+)@(?P<currentValue>[^/]+)/".to_string()],
            }],
        };
        ReferenceExtractor::new(RuleCompiler::compile(&def).unwrap())
    }

    #[test]
    fn test_unsupported_document_kind() {
        let extractor = text_only_extractor();
        let doc = json!({ "imports": {} });
        let err = extractor
            .extract(LocatorKind::CdnMirror, &Document::Json(&doc))
            .unwrap_err();
        assert!(matches!(
            err,
            DeprefError::UnsupportedDocumentKind {
                kind: LocatorKind::CdnMirror,
                document: DocumentKind::Json
            }
        ));
    }

    #[test]
    fn test_unknown_rule_set() {
        let extractor = text_only_extractor();
        assert!(matches!(
            extractor.extract(LocatorKind::ThinUrl, &Document::Text("")),
            Err(DeprefError::UnknownRuleSet(LocatorKind::ThinUrl))
        ));
    }

    #[test]
    fn test_duplicates_preserved() {
        let extractor = text_only_extractor();
        let text = r#"
            import { a } from "https://x.nest.land/sample@0.0.1/mod.ts";
            export { a } from "https://x.nest.land/sample@0.0.1/mod.ts";
        "#;
        let references = extractor.extract(LocatorKind::CdnMirror, &Document::Text(text)).unwrap();
        assert_eq!(references.len(), 2);
        assert_eq!(references[0], references[1]);
    }

    #[test]
    fn test_extract_all_skips_unsupported() {
        let extractor = text_only_extractor();
        let doc = json!({ "imports": { "sample": "https://x.nest.land/sample@0.0.1/mod.ts" } });
        assert!(extractor.extract_all(&Document::Json(&doc)).is_empty());
    }

    #[test]
    fn test_from_config_restricts_kinds() {
        let config = crate::config::ConfigManager::custom()
            .kinds(vec![LocatorKind::TagBasedSource])
            .build();
        let extractor = ReferenceExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.catalog().len(), 1);
        assert!(matches!(
            extractor.extract(LocatorKind::ThinUrl, &Document::Text("")),
            Err(DeprefError::UnknownRuleSet(_))
        ));
    }
}
