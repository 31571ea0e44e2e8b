//! Target framework preference table
//!
//! Ranks framework families so the resolver can pick one dependency group
//! per package. Lower rank wins; unranked families are never selected.

use crate::domain::{DependencyGroup, ANY_FAMILY};

/// Immutable ranking of framework families
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkPreference {
    ranks: Vec<(String, i32)>,
}

impl FrameworkPreference {
    /// Build a table from (family, rank) pairs
    pub fn new<S, I>(entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, i32)>,
    {
        Self {
            ranks: entries
                .into_iter()
                .map(|(family, rank)| (family.into(), rank))
                .collect(),
        }
    }

    /// Rank of a framework family, `None` when unranked
    pub fn rank(&self, family: &str) -> Option<i32> {
        self.ranks
            .iter()
            .find(|(ranked, _)| ranked.eq_ignore_ascii_case(family))
            .map(|(_, rank)| *rank)
    }

    /// Pick the dependency group that applies to a package.
    ///
    /// Groups with an unranked family are dropped. The rest are ordered by
    /// rank, then by framework version (highest first); on a full tie the
    /// group declared first wins.
    pub fn select<'g>(&self, groups: &'g [DependencyGroup]) -> Option<&'g DependencyGroup> {
        groups
            .iter()
            .filter_map(|group| {
                self.rank(group.target_framework.family())
                    .map(|rank| (rank, group))
            })
            .min_by(|(rank_a, a), (rank_b, b)| {
                rank_a.cmp(rank_b).then_with(|| {
                    b.target_framework
                        .version()
                        .cmp(a.target_framework.version())
                })
            })
            .map(|(_, group)| group)
    }
}

impl Default for FrameworkPreference {
    fn default() -> Self {
        Self::new([(".NETFramework", 0), (".NETStandard", 10), (ANY_FAMILY, 100)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PackageDependency, TargetFramework, VersionRange};

    fn group(framework: &str, dependency: &str) -> DependencyGroup {
        DependencyGroup {
            target_framework: TargetFramework::parse(framework),
            dependencies: vec![PackageDependency::new(dependency, VersionRange::any())],
        }
    }

    fn selected(preference: &FrameworkPreference, groups: &[DependencyGroup]) -> Option<String> {
        preference
            .select(groups)
            .map(|g| g.dependencies[0].id.clone())
    }

    #[test]
    fn test_default_ranks() {
        let preference = FrameworkPreference::default();
        assert_eq!(preference.rank(".NETFramework"), Some(0));
        assert_eq!(preference.rank(".netstandard"), Some(10));
        assert_eq!(preference.rank("any"), Some(100));
        assert_eq!(preference.rank(".NETCoreApp"), None);
    }

    #[test]
    fn test_select_prefers_lower_rank() {
        let preference = FrameworkPreference::default();
        let groups = vec![
            group("netstandard2.0", "standard"),
            group("net461", "framework"),
            group("", "any"),
        ];
        assert_eq!(selected(&preference, &groups).as_deref(), Some("framework"));
    }

    #[test]
    fn test_select_prefers_higher_version_within_family() {
        let preference = FrameworkPreference::default();
        let groups = vec![
            group("netstandard1.3", "old"),
            group("netstandard2.0", "new"),
            group("netstandard1.6", "mid"),
        ];
        assert_eq!(selected(&preference, &groups).as_deref(), Some("new"));
    }

    #[test]
    fn test_select_skips_unranked() {
        let preference = FrameworkPreference::default();
        let groups = vec![group("net6.0", "core"), group("netstandard2.0", "standard")];
        assert_eq!(selected(&preference, &groups).as_deref(), Some("standard"));
    }

    #[test]
    fn test_select_only_unranked() {
        let preference = FrameworkPreference::default();
        let groups = vec![group("net6.0", "core"), group("netcoreapp3.1", "core31")];
        assert!(preference.select(&groups).is_none());
        assert!(preference.select(&[]).is_none());
    }

    #[test]
    fn test_select_tie_keeps_declaration_order() {
        let preference = FrameworkPreference::default();
        let groups = vec![group("netstandard2.0", "first"), group("netstandard2.0", "second")];
        assert_eq!(selected(&preference, &groups).as_deref(), Some("first"));
    }

    #[test]
    fn test_custom_table() {
        let preference = FrameworkPreference::new([(".NETCoreApp", 0), (".NETStandard", 5)]);
        let groups = vec![group("netstandard2.0", "standard"), group("net8.0", "core")];
        assert_eq!(selected(&preference, &groups).as_deref(), Some("core"));
        assert_eq!(preference.rank(".NETFramework"), None);
        assert_eq!(preference.ranks.len(), 2);
    }
}
