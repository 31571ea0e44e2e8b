//! Registry adapters for fetching package metadata and versions
//!
//! This module provides:
//! - HTTP client shared foundation with optional retry logic
//! - NuGet V3 protocol adapter (service index + registration resources)

mod client;
mod nuget;

pub use client::{HttpClient, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use nuget::{NuGetRegistry, DEFAULT_SOURCE};

use crate::domain::{NuGetVersion, PackageMetadata};
use crate::error::RegistryError;
use crate::update::VersionInfo;
use async_trait::async_trait;

/// The two registry capabilities the resolver and update checker consume
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Get the registry name used in error messages
    fn registry_name(&self) -> &str;

    /// Fetch the dependency manifest for one exact (id, version).
    /// `Ok(None)` means the package or version does not exist.
    async fn get_metadata(
        &self,
        package_id: &str,
        version: &NuGetVersion,
    ) -> Result<Option<PackageMetadata>, RegistryError>;

    /// Fetch every published version of a package (empty if unknown)
    async fn get_all_versions(&self, package_id: &str) -> Result<Vec<VersionInfo>, RegistryError>;
}
