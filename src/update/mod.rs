//! Update checking for resolved packages
//!
//! This module provides:
//! - Update filter deciding which published versions count
//! - Version info from registry with listing state and release date
//! - Update checker that diffs the resolved map against the latest versions

mod filter;
mod version_info;

pub use filter::UpdateFilter;
pub use version_info::VersionInfo;

use crate::domain::{package_key, NuGetVersion, ResolvedVersionMap, UpdateEntry};
use crate::error::UpdateError;
use crate::progress::Progress;
use crate::registry::RegistryClient;
use tracing::{debug, info};

/// Compares each resolved package with its latest published version
pub struct UpdateChecker<'a> {
    registry: &'a dyn RegistryClient,
    filter: UpdateFilter,
}

impl<'a> UpdateChecker<'a> {
    pub fn new(registry: &'a dyn RegistryClient, filter: UpdateFilter) -> Self {
        Self { registry, filter }
    }

    /// Check every resolved package, one registry call at a time.
    ///
    /// Returns only packages with a newer version, sorted by identifier
    /// (case-insensitive).
    pub async fn check_updates(
        &self,
        resolved: &ResolvedVersionMap,
        progress: &Progress,
    ) -> Result<Vec<UpdateEntry>, UpdateError> {
        let mut updates = Vec::new();

        for package in resolved.iter() {
            progress.checking(&package.id);
            if let Some(entry) = self.check_package(&package.id, &package.version).await? {
                updates.push(entry);
            }
            progress.inc();
        }

        updates.sort_by(|a, b| {
            package_key(&a.package_id)
                .cmp(&package_key(&b.package_id))
                .then_with(|| a.package_id.cmp(&b.package_id))
        });
        Ok(updates)
    }

    /// Check a single package.
    ///
    /// Fails with `EmptyVersionSet` when the registry offers no eligible
    /// version at all, which means the package vanished after resolution.
    pub async fn check_package(
        &self,
        id: &str,
        current: &NuGetVersion,
    ) -> Result<Option<UpdateEntry>, UpdateError> {
        info!("Checking update for: {} ({})", id, current);

        let versions = self.registry.get_all_versions(id).await?;
        let latest = self
            .filter
            .eligible(current, &versions)
            .into_iter()
            .max()
            .ok_or_else(|| UpdateError::EmptyVersionSet {
                package: id.to_string(),
            })?;

        if latest.version <= *current {
            debug!("{} ({}) is up to date", id, current);
            return Ok(None);
        }

        Ok(Some(
            UpdateEntry::new(id, current.clone(), latest.version.clone())
                .with_published(latest.published),
        ))
    }
}
