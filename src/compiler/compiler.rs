//! 规则编译器核心
//! 仅负责将规则定义编译为不可变的可执行模式，任何非法模式在此处立即失败

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::pattern::{Pattern, PatternGroup, QueryPattern, RuleCatalog, RuleSet, TextPattern};
use super::query_path::QueryPath;
use crate::config::GlobalConfig;
use crate::error::{DeprefError, DeprefResult};
use crate::rule::{LocatorKind, QueryDef, RuleCatalogDef, RuleSetDef};

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则库（全部规则集）
    pub fn compile(catalog_def: &RuleCatalogDef) -> DeprefResult<RuleCatalog> {
        Self::compile_filtered(catalog_def, |_| true, false)
    }

    /// 按配置编译规则库（跳过未启用的规则集）
    pub fn compile_with_config(
        catalog_def: &RuleCatalogDef,
        config: &GlobalConfig,
    ) -> DeprefResult<RuleCatalog> {
        Self::compile_filtered(catalog_def, |kind| config.is_kind_enabled(kind), config.verbose)
    }

    fn compile_filtered(
        catalog_def: &RuleCatalogDef,
        enabled: impl Fn(LocatorKind) -> bool,
        verbose: bool,
    ) -> DeprefResult<RuleCatalog> {
        let start = Instant::now();
        let mut stats = CompileStats::default();
        let mut seen = HashSet::new();
        let mut rule_sets = Vec::with_capacity(catalog_def.rule_sets.len());

        for rule_set_def in &catalog_def.rule_sets {
            if !seen.insert(rule_set_def.kind) {
                return Err(DeprefError::DuplicateRuleSet(rule_set_def.kind));
            }
            if !enabled(rule_set_def.kind) {
                debug!("跳过未启用的规则集：{}", rule_set_def.kind);
                continue;
            }
            let rule_set = Self::compile_rule_set(rule_set_def, &mut stats)?;
            if verbose {
                log_rule_set(&rule_set);
            }
            rule_sets.push(Arc::new(rule_set));
        }

        debug!("✅ 规则编译完成，总耗时{:?}", start.elapsed());
        debug!(
            "📊 编译统计：规则集{}个、JSON查询{}条、文本模式{}条",
            rule_sets.len(),
            stats.query_count,
            stats.text_count
        );

        Ok(RuleCatalog { rule_sets })
    }

    /// 编译单个规则集
    fn compile_rule_set(def: &RuleSetDef, stats: &mut CompileStats) -> DeprefResult<RuleSet> {
        if def.json.is_empty() && def.text.is_empty() {
            return Err(DeprefError::EmptyRuleSet(def.kind));
        }

        let json = def
            .json
            .iter()
            .map(|query| Self::compile_query(def.kind, query).map(Pattern::Query))
            .collect::<DeprefResult<Vec<_>>>()?;
        let text = def
            .text
            .iter()
            .map(|raw| Self::compile_regex(def.kind, raw, true).map(|regex| Pattern::Text(TextPattern { regex })))
            .collect::<DeprefResult<Vec<_>>>()?;

        stats.query_count += json.len();
        stats.text_count += text.len();

        Ok(RuleSet {
            kind: def.kind,
            name_layout: def.name_layout,
            json: PatternGroup { patterns: json },
            text: PatternGroup { patterns: text },
        })
    }

    fn compile_query(kind: LocatorKind, query: &QueryDef) -> DeprefResult<QueryPattern> {
        let path = QueryPath::parse(&query.path).map_err(|reason| DeprefError::InvalidQueryPath {
            kind,
            path: query.path.clone(),
            reason,
        })?;
        let specifier = Self::compile_regex(kind, &query.specifier, false)?;
        Ok(QueryPattern { path, specifier })
    }

    /// 编译单个正则；至少要声明 currentValue 命名捕获组
    /// 文本模式开启多行模式，整个文档作为一个缓冲区扫描
    fn compile_regex(kind: LocatorKind, raw: &str, multi_line: bool) -> DeprefResult<Regex> {
        let regex = RegexBuilder::new(raw).multi_line(multi_line).build().map_err(|source| DeprefError::PatternCompileError {
            kind,
            pattern: raw.to_string(),
            source,
        })?;

        if !regex.capture_names().flatten().any(|name| name == "currentValue") {
            return Err(DeprefError::PatternCompileError {
                kind,
                pattern: raw.to_string(),
                source: regex::Error::Syntax("missing named capture group `currentValue`".to_string()),
            });
        }

        Ok(regex)
    }
}

/// 详细模式下逐条输出已编译的模式
fn log_rule_set(rule_set: &RuleSet) {
    for pattern in rule_set.json.patterns.iter().chain(&rule_set.text.patterns) {
        debug!("🔍 {} [{}] {}", rule_set.kind, pattern.document_kind(), pattern.describe());
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    query_count: usize,
    text_count: usize,
}
