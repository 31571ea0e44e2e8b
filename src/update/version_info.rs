//! Version information from registry
//!
//! This module provides the VersionInfo struct that represents
//! a published package version with its listing state and release date.

use crate::domain::NuGetVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a package version from the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// The published version
    pub version: NuGetVersion,
    /// Unlisted versions stay installable but are hidden from search
    pub listed: bool,
    /// When this version was published
    pub published: Option<DateTime<Utc>>,
}

impl VersionInfo {
    /// Create a listed VersionInfo without a publish date
    pub fn new(version: NuGetVersion) -> Self {
        Self {
            version,
            listed: true,
            published: None,
        }
    }

    /// Parse a version string into a listed VersionInfo
    pub fn parse(version: &str) -> Result<Self, crate::error::VersionError> {
        NuGetVersion::parse(version).map(Self::new)
    }

    /// Set the publish date
    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = Some(published);
        self
    }

    /// Set whether the version is listed
    pub fn with_listed(mut self, listed: bool) -> Self {
        self.listed = listed;
        self
    }

    /// Returns true if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        self.version.is_prerelease()
    }
}

impl Ord for VersionInfo {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.version.cmp(&other.version)
    }
}

impl PartialOrd for VersionInfo {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
