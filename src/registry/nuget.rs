//! NuGet V3 registry adapter
//!
//! Reads the service index at the configured source, then serves both
//! registry capabilities from the package registration resource:
//! `{RegistrationsBaseUrl}{id-lowercase}/index.json`.
//!
//! Registration pages that do not inline their leaves are fetched on demand.
//! The expanded registration is cached per package id for the lifetime of
//! the adapter, so each package is downloaded at most once per run.

use crate::domain::{
    package_key, DependencyGroup, NuGetVersion, PackageDependency, PackageMetadata,
    TargetFramework, VersionRange,
};
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryClient};
use crate::update::VersionInfo;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// nuget.org V3 service index
pub const DEFAULT_SOURCE: &str = "https://api.nuget.org/v3/index.json";

const REGISTRY_NAME: &str = "NuGet";

/// Registration resource types in order of preference
const REGISTRATION_TYPES: &[&str] = &[
    "RegistrationsBaseUrl/3.6.0",
    "RegistrationsBaseUrl/3.4.0",
    "RegistrationsBaseUrl",
];

/// Service index document
#[derive(Debug, Deserialize)]
struct ServiceIndex {
    resources: Vec<ServiceResource>,
}

#[derive(Debug, Deserialize)]
struct ServiceResource {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    resource_type: ResourceType,
}

/// `@type` is a string on nuget.org but an array on some feeds
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResourceType {
    One(String),
    Many(Vec<String>),
}

impl ResourceType {
    fn matches(&self, wanted: &str) -> bool {
        match self {
            ResourceType::One(t) => t == wanted,
            ResourceType::Many(ts) => ts.iter().any(|t| t == wanted),
        }
    }
}

/// Registration index: a list of pages
#[derive(Debug, Deserialize)]
struct RegistrationIndex {
    #[serde(default)]
    items: Vec<RegistrationPage>,
}

#[derive(Debug, Deserialize)]
struct RegistrationPage {
    #[serde(rename = "@id")]
    id: String,
    /// Absent when the page must be fetched separately
    #[serde(default)]
    items: Option<Vec<RegistrationLeaf>>,
}

#[derive(Debug, Deserialize)]
struct RegistrationPageBody {
    #[serde(default)]
    items: Vec<RegistrationLeaf>,
}

#[derive(Debug, Deserialize)]
struct RegistrationLeaf {
    #[serde(rename = "catalogEntry")]
    catalog_entry: CatalogEntry,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    version: String,
    #[serde(default)]
    listed: Option<bool>,
    #[serde(default)]
    published: Option<String>,
    #[serde(rename = "dependencyGroups", default)]
    dependency_groups: Vec<RawDependencyGroup>,
}

#[derive(Debug, Deserialize)]
struct RawDependencyGroup {
    #[serde(rename = "targetFramework", default)]
    target_framework: Option<String>,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    id: String,
    #[serde(default)]
    range: Option<String>,
}

/// One version of a package as described by its registration leaf
#[derive(Debug, Clone)]
struct RegistrationEntry {
    metadata: PackageMetadata,
    info: VersionInfo,
}

/// Registry client for NuGet V3 feeds
pub struct NuGetRegistry {
    client: HttpClient,
    source: String,
    registration_base: OnceCell<String>,
    registrations: Mutex<HashMap<String, Arc<Vec<RegistrationEntry>>>>,
}

impl NuGetRegistry {
    /// Create an adapter for the given service index URL
    pub fn new(client: HttpClient, source: impl Into<String>) -> Self {
        Self {
            client,
            source: source.into(),
            registration_base: OnceCell::new(),
            registrations: Mutex::new(HashMap::new()),
        }
    }

    /// Build the registration index URL for a package
    fn build_url(base: &str, package_id: &str) -> String {
        format!("{}{}/index.json", base, package_key(package_id))
    }

    /// Resolve the registration base URL from the service index (once)
    async fn registration_base(&self) -> Result<&str, RegistryError> {
        let base = self
            .registration_base
            .get_or_try_init(|| async {
                let index: ServiceIndex = self
                    .client
                    .get_json(&self.source, "", REGISTRY_NAME)
                    .await
                    .map_err(|e| RegistryError::ServiceIndex {
                        source_url: self.source.clone(),
                        message: e.to_string(),
                    })?;
                select_registration_base(&index).ok_or_else(|| RegistryError::ServiceIndex {
                    source_url: self.source.clone(),
                    message: "no RegistrationsBaseUrl resource".to_string(),
                })
            })
            .await?;
        Ok(base.as_str())
    }

    /// Load (or reuse) every registration entry of a package
    async fn registration(
        &self,
        package_id: &str,
    ) -> Result<Arc<Vec<RegistrationEntry>>, RegistryError> {
        let key = package_key(package_id);
        if let Some(cached) = self.registrations.lock().await.get(&key) {
            return Ok(Arc::clone(cached));
        }

        let url = Self::build_url(self.registration_base().await?, package_id);
        let entries = match self
            .client
            .get_json::<RegistrationIndex>(&url, package_id, REGISTRY_NAME)
            .await
        {
            Ok(index) => self.expand_pages(package_id, index).await?,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e),
        };

        let entries = Arc::new(entries);
        self.registrations
            .lock()
            .await
            .insert(key, Arc::clone(&entries));
        Ok(entries)
    }

    async fn expand_pages(
        &self,
        package_id: &str,
        index: RegistrationIndex,
    ) -> Result<Vec<RegistrationEntry>, RegistryError> {
        let mut entries = Vec::new();
        for page in index.items {
            let leaves = match page.items {
                Some(leaves) => leaves,
                None => {
                    let body: RegistrationPageBody = self
                        .client
                        .get_json(&page.id, package_id, REGISTRY_NAME)
                        .await?;
                    body.items
                }
            };
            entries.extend(leaves.into_iter().filter_map(|leaf| {
                convert_entry(leaf.catalog_entry)
                    .map_err(|message| {
                        tracing::warn!("Skipping registry entry for {}: {}", package_id, message);
                    })
                    .ok()
            }));
        }
        Ok(entries)
    }
}

fn select_registration_base(index: &ServiceIndex) -> Option<String> {
    REGISTRATION_TYPES.iter().find_map(|wanted| {
        index
            .resources
            .iter()
            .find(|r| r.resource_type.matches(wanted))
            .map(|r| {
                if r.id.ends_with('/') {
                    r.id.clone()
                } else {
                    format!("{}/", r.id)
                }
            })
    })
}

fn convert_entry(entry: CatalogEntry) -> Result<RegistrationEntry, String> {
    let version = NuGetVersion::parse(&entry.version).map_err(|e| e.to_string())?;

    let mut metadata = PackageMetadata::new(entry.id, version.clone());
    for group in entry.dependency_groups {
        let target_framework = group
            .target_framework
            .as_deref()
            .map(TargetFramework::parse)
            .unwrap_or_default();
        let dependencies = group
            .dependencies
            .into_iter()
            .filter_map(|dep| {
                let raw = dep.range.as_deref().unwrap_or("");
                match VersionRange::parse(raw) {
                    Ok(range) => Some(PackageDependency::new(dep.id, range)),
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring dependency {} of {} ({}) for {}: {}",
                            dep.id,
                            metadata.id,
                            version,
                            target_framework,
                            e
                        );
                        None
                    }
                }
            })
            .collect();
        metadata = metadata.with_group(DependencyGroup::new(target_framework, dependencies));
    }

    let mut info = VersionInfo::new(version).with_listed(entry.listed.unwrap_or(true));
    if let Some(published) = entry
        .published
        .as_deref()
        .and_then(|p| p.parse::<DateTime<Utc>>().ok())
    {
        info = info.with_published(published);
    }

    Ok(RegistrationEntry { metadata, info })
}

#[async_trait]
impl RegistryClient for NuGetRegistry {
    fn registry_name(&self) -> &str {
        REGISTRY_NAME
    }

    async fn get_metadata(
        &self,
        package_id: &str,
        version: &NuGetVersion,
    ) -> Result<Option<PackageMetadata>, RegistryError> {
        let entries = self.registration(package_id).await?;
        Ok(entries
            .iter()
            .find(|e| &e.metadata.version == version)
            .map(|e| e.metadata.clone()))
    }

    async fn get_all_versions(&self, package_id: &str) -> Result<Vec<VersionInfo>, RegistryError> {
        let entries = self.registration(package_id).await?;
        let mut versions: Vec<VersionInfo> = entries.iter().map(|e| e.info.clone()).collect();
        versions.sort();
        Ok(versions)
    }
}
