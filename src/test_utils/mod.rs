//! Test utilities for nuget-updater
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests under `tests/`.
//!
//! - [`MockRegistry`]: in-memory [`RegistryClient`] with a call log and
//!   injectable transport failures
//! - [`group`]: shorthand for building dependency groups
//! - [`init_test_logging`]: one-time tracing setup for tests

use crate::domain::{
    package_key, DependencyGroup, NuGetVersion, PackageDependency, PackageMetadata,
    TargetFramework, VersionRange,
};
use crate::error::RegistryError;
use crate::registry::RegistryClient;
use crate::update::VersionInfo;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. Does nothing if neither is
/// set. Safe to call from every test.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Build a dependency group from a framework name and (id, range) pairs.
///
/// # Panics
///
/// Panics if a range does not parse.
pub fn group(framework: &str, dependencies: &[(&str, &str)]) -> DependencyGroup {
    DependencyGroup::new(
        TargetFramework::parse(framework),
        dependencies
            .iter()
            .map(|(id, range)| {
                let range = VersionRange::parse(range)
                    .unwrap_or_else(|e| panic!("bad range in test fixture: {}", e));
                PackageDependency::new(*id, range)
            })
            .collect(),
    )
}

#[derive(Debug, Clone)]
struct MockVersion {
    metadata: PackageMetadata,
    listed: bool,
}

/// In-memory registry
///
/// Packages are keyed case-insensitively. Every `get_metadata` call is
/// logged as `"<id> <version>"` in call order.
#[derive(Debug, Default)]
pub struct MockRegistry {
    packages: HashMap<String, Vec<MockVersion>>,
    failing: HashSet<String>,
    metadata_calls: Mutex<Vec<String>>,
    version_calls: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a listed version with the given dependency groups.
    ///
    /// # Panics
    ///
    /// Panics if `version` does not parse.
    pub fn with_package(self, id: &str, version: &str, groups: Vec<DependencyGroup>) -> Self {
        self.publish(id, version, groups, true)
    }

    /// Publish an unlisted version without dependencies
    pub fn with_unlisted(self, id: &str, version: &str) -> Self {
        self.publish(id, version, Vec::new(), false)
    }

    /// Make every call for `id` fail with a network error
    pub fn with_failure(mut self, id: &str) -> Self {
        self.failing.insert(package_key(id));
        self
    }

    fn publish(
        mut self,
        id: &str,
        version: &str,
        groups: Vec<DependencyGroup>,
        listed: bool,
    ) -> Self {
        let version = NuGetVersion::parse(version)
            .unwrap_or_else(|e| panic!("bad version in test fixture: {}", e));
        let metadata = groups
            .into_iter()
            .fold(PackageMetadata::new(id, version), PackageMetadata::with_group);
        self.packages
            .entry(package_key(id))
            .or_default()
            .push(MockVersion { metadata, listed });
        self
    }

    /// `get_metadata` calls so far, as `"<id> <version>"`
    pub fn metadata_calls(&self) -> Vec<String> {
        lock(&self.metadata_calls).clone()
    }

    /// Package ids passed to `get_all_versions` so far
    pub fn version_calls(&self) -> Vec<String> {
        lock(&self.version_calls).clone()
    }

    fn check_failure(&self, package_id: &str) -> Result<(), RegistryError> {
        if self.failing.contains(&package_key(package_id)) {
            return Err(RegistryError::network_error(
                package_id,
                self.registry_name(),
                "connection refused",
            ));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl RegistryClient for MockRegistry {
    fn registry_name(&self) -> &str {
        "Mock"
    }

    async fn get_metadata(
        &self,
        package_id: &str,
        version: &NuGetVersion,
    ) -> Result<Option<PackageMetadata>, RegistryError> {
        lock(&self.metadata_calls).push(format!("{} {}", package_id, version));
        self.check_failure(package_id)?;

        Ok(self
            .packages
            .get(&package_key(package_id))
            .and_then(|versions| versions.iter().find(|v| v.metadata.version == *version))
            .map(|v| v.metadata.clone()))
    }

    async fn get_all_versions(&self, package_id: &str) -> Result<Vec<VersionInfo>, RegistryError> {
        lock(&self.version_calls).push(package_id.to_string());
        self.check_failure(package_id)?;

        let mut versions: Vec<VersionInfo> = self
            .packages
            .get(&package_key(package_id))
            .map(|versions| {
                versions
                    .iter()
                    .map(|v| VersionInfo::new(v.metadata.version.clone()).with_listed(v.listed))
                    .collect()
            })
            .unwrap_or_default();
        versions.sort();
        Ok(versions)
    }
}
