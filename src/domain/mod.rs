//! Core domain models for nuget-updater
//!
//! This module contains the fundamental types used throughout the application:
//! - NuGet versions and version ranges
//! - Target framework identifiers
//! - Package references, dependency groups and registry metadata
//! - The resolved version map
//! - Update check results

mod framework;
mod package;
mod resolved;
mod update_entry;
mod version;
mod version_range;

pub use framework::{FrameworkVersion, TargetFramework, ANY_FAMILY};
pub use package::{
    package_key, DependencyGroup, PackageDependency, PackageMetadata, PackageReference,
};
pub use resolved::{ResolvedPackage, ResolvedVersionMap};
pub use update_entry::UpdateEntry;
pub use version::NuGetVersion;
pub use version_range::VersionRange;
