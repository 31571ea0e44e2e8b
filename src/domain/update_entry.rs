//! Update check result types

use super::NuGetVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved package whose latest published version is newer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntry {
    /// Package identifier
    pub package_id: String,
    /// Version resolved for the project
    pub current_version: NuGetVersion,
    /// Latest eligible version in the registry
    pub latest_version: NuGetVersion,
    /// When the latest version was published, if the registry reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
}

impl UpdateEntry {
    /// Creates an update entry
    pub fn new(
        package_id: impl Into<String>,
        current_version: NuGetVersion,
        latest_version: NuGetVersion,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            current_version,
            latest_version,
            published: None,
        }
    }

    /// Sets the publish date of the latest version (builder pattern)
    pub fn with_published(mut self, published: Option<DateTime<Utc>>) -> Self {
        self.published = published;
        self
    }
}

impl fmt::Display for UpdateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.package_id, self.current_version, self.latest_version
        )
    }
}
