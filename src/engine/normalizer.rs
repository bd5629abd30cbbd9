//! 归一化器：捕获记录 -> (dependencyName, currentValue, locatorKind)
//! 版本记号原样透传（不做 semver 校验，范围前缀与前导 v 均保留）

use tracing::trace;
use url::Url;

use super::record::{CaptureRecord, ExtractedReference};
use crate::compiler::RuleSet;
use crate::rule::{LocatorKind, NameLayout};

pub const DEP_NAME: &str = "depName";
pub const CURRENT_VALUE: &str = "currentValue";
pub const OWNER: &str = "owner";
pub const REPO: &str = "repo";
pub const SCOPE: &str = "scope";
pub const PKG: &str = "pkg";

/// 归一化所需的托管约定上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConventionContext {
    pub kind: LocatorKind,
    pub name_layout: NameLayout,
}

impl From<&RuleSet> for ConventionContext {
    fn from(rule_set: &RuleSet) -> Self {
        Self {
            kind: rule_set.kind,
            name_layout: rule_set.name_layout,
        }
    }
}

/// 归一化器
pub struct Normalizer;

impl Normalizer {
    /// 缺少必要字段时返回 None：部分匹配说明命中的是附带文本，不是真实引用
    pub fn normalize(record: &CaptureRecord, context: ConventionContext) -> Option<ExtractedReference> {
        let Some(current_value) = record.get_non_empty(CURRENT_VALUE) else {
            trace!("丢弃记录（缺少currentValue）：{:?}", record);
            return None;
        };
        let Some(dependency_name) = Self::dependency_name(record, context.name_layout) else {
            trace!("丢弃记录（无法推导依赖名，布局={:?}）：{:?}", context.name_layout, record);
            return None;
        };

        Some(ExtractedReference {
            dependency_name,
            current_value: current_value.to_string(),
            locator_kind: context.kind,
        })
    }

    /// 按约定的固定布局拼装依赖名
    fn dependency_name(record: &CaptureRecord, layout: NameLayout) -> Option<String> {
        match layout {
            NameLayout::Verbatim => record.get_non_empty(DEP_NAME).map(str::to_string),
            NameLayout::Url => {
                let raw = record.get_non_empty(DEP_NAME)?;
                let url = Url::parse(raw).ok()?;
                url.has_host().then(|| url.to_string())
            }
            NameLayout::OwnerRepo => {
                let owner = record.get_non_empty(OWNER)?;
                let repo = record.get_non_empty(REPO)?;
                Some(format!("{}/{}", owner, repo))
            }
            NameLayout::ScopedPackage => {
                let pkg = record.get_non_empty(PKG)?;
                Some(match record.get_non_empty(SCOPE) {
                    Some(scope) => join_scope(scope, pkg),
                    None => pkg.to_string(),
                })
            }
            NameLayout::RequiredScope => {
                let scope = record.get_non_empty(SCOPE)?;
                let pkg = record.get_non_empty(PKG)?;
                Some(join_scope(scope, pkg))
            }
        }
    }
}

fn join_scope(scope: &str, pkg: &str) -> String {
    if scope.starts_with('@') {
        format!("{}/{}", scope, pkg)
    } else {
        format!("@{}/{}", scope, pkg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(kind: LocatorKind, name_layout: NameLayout) -> ConventionContext {
        ConventionContext { kind, name_layout }
    }

    fn record(fields: &[(&str, &str)]) -> CaptureRecord {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_owner_repo() {
        let reference = Normalizer::normalize(
            &record(&[("owner", "user"), ("repo", "repo"), ("currentValue", "sampleversion")]),
            context(LocatorKind::TagBasedSource, NameLayout::OwnerRepo),
        )
        .unwrap();
        assert_eq!(reference.dependency_name, "user/repo");
        assert_eq!(reference.current_value, "sampleversion");
        assert_eq!(reference.locator_kind, LocatorKind::TagBasedSource);
    }

    #[test]
    fn test_scoped_package_optional_scope() {
        let ctx = context(LocatorKind::ThinUrl, NameLayout::ScopedPackage);
        let scoped = Normalizer::normalize(&record(&[("scope", "@bar"), ("pkg", "foo"), ("currentValue", "0.1.0")]), ctx);
        let bare = Normalizer::normalize(&record(&[("pkg", "foo"), ("currentValue", "0.1.0")]), ctx);
        let empty_scope = Normalizer::normalize(&record(&[("scope", ""), ("pkg", "foo"), ("currentValue", "0.1.0")]), ctx);

        assert_eq!(scoped.unwrap().dependency_name, "@bar/foo");
        assert_eq!(bare.unwrap().dependency_name, "foo");
        assert_eq!(empty_scope.unwrap().dependency_name, "foo");
    }

    #[test]
    fn test_required_scope() {
        let ctx = context(LocatorKind::ScopedRegistry, NameLayout::RequiredScope);
        assert!(Normalizer::normalize(&record(&[("pkg", "flag"), ("currentValue", "1")]), ctx).is_none());

        let reference = Normalizer::normalize(&record(&[("scope", "luca"), ("pkg", "flag"), ("currentValue", "1")]), ctx);
        assert_eq!(reference.unwrap().dependency_name, "@luca/flag");
    }

    #[test]
    fn test_url_layout() {
        let ctx = context(LocatorKind::StandardLibrary, NameLayout::Url);
        let reference = Normalizer::normalize(&record(&[("depName", "https://deno.land/std"), ("currentValue", "v0.204.0")]), ctx);
        assert_eq!(reference.unwrap().dependency_name, "https://deno.land/std");

        assert!(Normalizer::normalize(&record(&[("depName", "deno.land/std"), ("currentValue", "1")]), ctx).is_none());
        assert!(Normalizer::normalize(&record(&[("depName", "data:text/plain"), ("currentValue", "1")]), ctx).is_none());
    }

    #[test]
    fn test_range_and_v_prefix_passthrough() {
        let ctx = context(LocatorKind::ThinUrl, NameLayout::ScopedPackage);
        for value in ["^5.0.0", "~5.0.0", ">5.0.0", ">=5.0.0", "<5.0.0", "v1.0.0"] {
            let reference = Normalizer::normalize(&record(&[("pkg", "chalk"), ("currentValue", value)]), ctx).unwrap();
            assert_eq!(reference.current_value, value);
        }
    }

    #[test]
    fn test_missing_fields_dropped() {
        let ctx = context(LocatorKind::CdnMirror, NameLayout::Verbatim);
        assert!(Normalizer::normalize(&record(&[("depName", "sample")]), ctx).is_none());
        assert!(Normalizer::normalize(&record(&[("depName", "sample"), ("currentValue", "")]), ctx).is_none());
        assert!(Normalizer::normalize(&record(&[("currentValue", "0.0.1")]), ctx).is_none());
        assert!(Normalizer::normalize(
            &record(&[("owner", "user"), ("currentValue", "1.0.0")]),
            context(LocatorKind::TagBasedSource, NameLayout::OwnerRepo)
        )
        .is_none());
    }
}
