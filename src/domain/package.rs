//! Package references and registry metadata

use super::{NuGetVersion, TargetFramework, VersionRange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (package id, version) pair, as declared in a project or reached during resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    /// Package identifier (case-insensitive)
    pub id: String,
    /// Requested version
    pub version: NuGetVersion,
}

impl PackageReference {
    /// Creates a new package reference
    pub fn new(id: impl Into<String>, version: NuGetVersion) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.version)
    }
}

/// Normalizes a package id for case-insensitive lookup
pub fn package_key(id: &str) -> String {
    id.to_ascii_lowercase()
}

/// One dependency inside a dependency group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDependency {
    /// Dependency package identifier
    pub id: String,
    /// Accepted versions
    pub range: VersionRange,
}

impl PackageDependency {
    /// Creates a new dependency
    pub fn new(id: impl Into<String>, range: VersionRange) -> Self {
        Self {
            id: id.into(),
            range,
        }
    }
}

/// Dependencies a package declares for one target framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGroup {
    /// Framework the group applies to
    pub target_framework: TargetFramework,
    /// Dependencies in declaration order
    pub dependencies: Vec<PackageDependency>,
}

impl DependencyGroup {
    /// Creates a new dependency group
    pub fn new(target_framework: TargetFramework, dependencies: Vec<PackageDependency>) -> Self {
        Self {
            target_framework,
            dependencies,
        }
    }
}

/// Registry metadata for one exact (id, version)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Identifier with the registry's casing
    pub id: String,
    /// Exact version
    pub version: NuGetVersion,
    /// Per-framework dependency groups
    pub dependency_groups: Vec<DependencyGroup>,
}

impl PackageMetadata {
    /// Creates metadata with no dependency groups
    pub fn new(id: impl Into<String>, version: NuGetVersion) -> Self {
        Self {
            id: id.into(),
            version,
            dependency_groups: Vec::new(),
        }
    }

    /// Adds a dependency group (builder pattern)
    pub fn with_group(mut self, group: DependencyGroup) -> Self {
        self.dependency_groups.push(group);
        self
    }
}
