//! 内置规则库
//! 六种模块托管约定的模式定义。文本模式 = 语句前缀 + specifier 主体；
//! JSON 查询 = import map 路径 + 锚定的 specifier 主体，两条路径共用同一份主体。

use once_cell::sync::Lazy;

use super::model::{LocatorKind, NameLayout, QueryDef, RuleCatalogDef, RuleSetDef};

/// 能引用模块的语句前缀，以开引号结尾：
/// `import … from "`、`export … from "`、`import "`、`import("`、
/// `// @deno-types="`、`// @ts-types="`
///
/// `import` 与 `from` 之间允许出现行注释和块注释，注释内容不受字符限制
const STATEMENT_PREFIX: &str = r#"(?:\b(?:import|export)\b(?:\s*\(\s*|(?:[^"'`;()]|//[^\n]*|/\*[\s\S]*?\*/)*?\bfrom\s*|\s*)|//\s*@(?:deno|ts)-types\s*=\s*)["']"#;

/// 版本/范围记号：到路径分隔、引号、空白、查询串或片段为止
const VERSION: &str = r#"[^\s/"'`?#]+"#;

/// import map 中可能出现 specifier 的位置
const IMPORT_MAP_PATHS: [&str; 2] = ["/imports", "/scopes/*"];

const DENO_STD: &str = r"(?P<depName>https://deno\.land/std)@(?P<currentValue>{version})";
const DENO_X: &str = r"(?P<depName>https://deno\.land/x/[\w-]+)@(?P<currentValue>{version})";
const NEST_LAND: &str = r"https://x\.nest\.land/(?P<depName>[\w.-]+)@(?P<currentValue>{version})";
const NPM_PROTOCOL: &str =
    r"npm:/?(?:(?P<scope>@[\w.-]+)/)?(?P<pkg>[\w.-]+)@(?P<currentValue>{version})";
const NPM_CDN: &str = r"https://(?:esm\.sh(?:/v\d+)?|unpkg\.com|cdn\.skypack\.dev|cdn\.jsdelivr\.net/npm)/(?:(?P<scope>@[\w.-]+)/)?(?P<pkg>[\w.-]+)@(?P<currentValue>{version})";
// jsr 的 ^/~ 留在捕获组外
const JSR_PROTOCOL: &str =
    r"jsr:/?(?P<scope>@[\w.-]+)/(?P<pkg>[\w.-]+)@[\^~]?(?P<currentValue>{version})";
const JSR_URL: &str =
    r"https://jsr\.io/(?P<scope>@[\w.-]+)/(?P<pkg>[\w.-]+)/(?P<currentValue>\d{version_tail})";
const GITHUB_RAW: &str = r"https://raw\.githubusercontent\.com/(?P<owner>[\w.-]+)/(?P<repo>[\w.-]+)/(?P<currentValue>{version})/";
const PAX_DENO_DEV: &str =
    r"https://pax\.deno\.dev/(?P<owner>[\w.-]+)/(?P<repo>[\w.-]+)@(?P<currentValue>{version})";
const JSDELIVR_GH: &str =
    r"https://cdn\.jsdelivr\.net/gh/(?P<owner>[\w.-]+)/(?P<repo>[\w.-]+)@(?P<currentValue>{version})";

/// 全局内置规则库定义（只读）
pub static BUILTIN_CATALOG: Lazy<RuleCatalogDef> = Lazy::new(builtin_catalog);

/// 构建内置规则库定义
pub fn builtin_catalog() -> RuleCatalogDef {
    RuleCatalogDef {
        rule_sets: vec![
            rule_set(LocatorKind::StandardLibrary, NameLayout::Url, &[DENO_STD]),
            rule_set(LocatorKind::RegistryModule, NameLayout::Url, &[DENO_X]),
            rule_set(LocatorKind::ThinUrl, NameLayout::ScopedPackage, &[NPM_PROTOCOL, NPM_CDN]),
            rule_set(LocatorKind::CdnMirror, NameLayout::Verbatim, &[NEST_LAND]),
            rule_set(LocatorKind::ScopedRegistry, NameLayout::RequiredScope, &[JSR_PROTOCOL, JSR_URL]),
            rule_set(
                LocatorKind::TagBasedSource,
                NameLayout::OwnerRepo,
                &[GITHUB_RAW, PAX_DENO_DEV, JSDELIVR_GH],
            ),
        ],
    }
}

fn rule_set(kind: LocatorKind, name_layout: NameLayout, bodies: &[&str]) -> RuleSetDef {
    let bodies: Vec<String> = bodies.iter().map(|body| expand(body)).collect();

    let json = IMPORT_MAP_PATHS
        .iter()
        .flat_map(|path| {
            bodies
                .iter()
                .map(move |body| QueryDef::new(*path, format!("^{}", body)))
        })
        .collect();
    let text = bodies
        .iter()
        .map(|body| format!("{}{}", STATEMENT_PREFIX, body))
        .collect();

    RuleSetDef {
        kind,
        name_layout,
        json,
        text,
    }
}

/// 替换主体中的版本占位符
fn expand(body: &str) -> String {
    // 先替换 tail，避免 {version} 误伤 {version_tail}
    let tail = VERSION.replacen('+', "*", 1);
    body.replace("{version_tail}", &tail)
        .replace("{version}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_every_kind_present_once() {
        let catalog = builtin_catalog();
        let kinds: Vec<LocatorKind> = catalog.rule_sets.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, LocatorKind::ALL.to_vec());
    }

    #[test]
    fn test_all_builtin_patterns_compile() {
        for rule_set in &BUILTIN_CATALOG.rule_sets {
            for pattern in &rule_set.text {
                assert!(Regex::new(pattern).is_ok(), "{}: {}", rule_set.kind, pattern);
            }
            for query in &rule_set.json {
                assert!(Regex::new(&query.specifier).is_ok(), "{}: {}", rule_set.kind, query.specifier);
                assert!(query.specifier.starts_with('^'));
            }
        }
    }

    #[test]
    fn test_placeholders_expanded() {
        assert!(!expand(JSR_URL).contains('{'));
        assert!(expand(JSR_URL).ends_with(r#"(?P<currentValue>\d[^\s/"'`?#]*)"#));
        assert!(expand(DENO_STD).ends_with(r#"(?P<currentValue>[^\s/"'`?#]+)"#));
    }

    #[test]
    fn test_query_order_is_path_major() {
        let thin = &BUILTIN_CATALOG.rule_sets[2];
        let paths: Vec<&str> = thin.json.iter().map(|q| q.path.as_str()).collect();
        assert_eq!(paths, vec!["/imports", "/imports", "/scopes/*", "/scopes/*"]);
        assert_eq!(thin.text.len(), 2);
    }
}
