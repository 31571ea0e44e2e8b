//! Update filter configuration
//!
//! Decides which published versions may be offered as the latest version of
//! a package.

use super::VersionInfo;
use crate::domain::NuGetVersion;

/// Filter configuration for picking update candidates
#[derive(Debug, Clone, Default)]
pub struct UpdateFilter {
    /// Offer prerelease versions even when the current version is stable
    pub include_prerelease: bool,
}

impl UpdateFilter {
    /// Create a filter with default settings (listed, stable versions)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to offer prerelease versions
    pub fn with_include_prerelease(mut self, include: bool) -> Self {
        self.include_prerelease = include;
        self
    }

    /// Versions that may be offered as an update for `current`.
    ///
    /// Unlisted versions are never offered. Prerelease versions are offered
    /// only when enabled or when `current` is itself a prerelease.
    pub fn eligible<'v>(
        &self,
        current: &NuGetVersion,
        versions: &'v [VersionInfo],
    ) -> Vec<&'v VersionInfo> {
        let allow_prerelease = self.include_prerelease || current.is_prerelease();
        versions
            .iter()
            .filter(|v| v.listed)
            .filter(|v| allow_prerelease || !v.is_prerelease())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(version: &str) -> NuGetVersion {
        NuGetVersion::parse(version).unwrap()
    }

    fn infos(versions: &[&str]) -> Vec<VersionInfo> {
        versions.iter().map(|s| VersionInfo::parse(s).unwrap()).collect()
    }

    fn names(eligible: Vec<&VersionInfo>) -> Vec<String> {
        eligible.iter().map(|i| i.version.to_string()).collect()
    }

    #[test]
    fn test_new_filter() {
        assert!(!UpdateFilter::new().include_prerelease);
        assert!(UpdateFilter::new().with_include_prerelease(true).include_prerelease);
    }

    #[test]
    fn test_eligible_drops_prerelease_for_stable_current() {
        let versions = infos(&["1.0.0", "1.1.0", "2.0.0-beta.1"]);
        let eligible = UpdateFilter::new().eligible(&v("1.0.0"), &versions);
        assert_eq!(names(eligible), vec!["1.0.0", "1.1.0"]);
    }

    #[test]
    fn test_eligible_keeps_prerelease_for_prerelease_current() {
        let versions = infos(&["1.0.0", "2.0.0-beta.1", "2.0.0-beta.2"]);
        let eligible = UpdateFilter::new().eligible(&v("2.0.0-beta.1"), &versions);
        assert_eq!(eligible.len(), 3);
    }

    #[test]
    fn test_eligible_include_prerelease() {
        let versions = infos(&["1.0.0", "2.0.0-rc.1"]);
        let eligible = UpdateFilter::new()
            .with_include_prerelease(true)
            .eligible(&v("1.0.0"), &versions);
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn test_eligible_drops_unlisted() {
        let mut versions = infos(&["1.0.0", "1.2.0"]);
        versions[1] = versions[1].clone().with_listed(false);
        let eligible = UpdateFilter::new()
            .with_include_prerelease(true)
            .eligible(&v("1.0.0"), &versions);
        assert_eq!(names(eligible), vec!["1.0.0"]);
    }
}
