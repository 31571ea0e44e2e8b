//! Declared package references from MSBuild project files
//!
//! Supports SDK-style and classic projects (`*.csproj`, `*.fsproj`,
//! `*.vbproj`). Only `PackageReference` items are read; properties, imports
//! and conditions are not evaluated.

use crate::domain::{package_key, PackageReference, VersionRange};
use crate::error::{ProjectError, VersionError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extensions recognised as project files
pub const PROJECT_EXTENSIONS: &[&str] = &["csproj", "fsproj", "vbproj"];

#[derive(Debug, Deserialize)]
struct ProjectXml {
    #[serde(rename = "ItemGroup", default)]
    item_groups: Vec<ItemGroupXml>,
}

#[derive(Debug, Deserialize)]
struct ItemGroupXml {
    #[serde(rename = "PackageReference", default)]
    package_references: Vec<PackageReferenceXml>,
}

#[derive(Debug, Deserialize)]
struct PackageReferenceXml {
    #[serde(rename = "@Include")]
    include: Option<String>,
    #[serde(rename = "@Update")]
    update: Option<String>,
    #[serde(rename = "@Version")]
    version_attribute: Option<String>,
    #[serde(rename = "Version")]
    version_element: Option<String>,
}

/// A project file and the references it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub path: PathBuf,
    /// Declared references in document order
    pub references: Vec<PackageReference>,
}

impl ProjectFile {
    /// Load a project file, or the single project file inside a directory
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        if !path.exists() {
            return Err(ProjectError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let path = if path.is_dir() {
            find_project_file(path)?
        } else {
            path.to_path_buf()
        };

        let content =
            std::fs::read_to_string(&path).map_err(|e| ProjectError::read_error(&path, e))?;
        let references = parse_references(&content, &path)?;
        debug!(
            "Read {} package references from {}",
            references.len(),
            path.display()
        );

        Ok(Self { path, references })
    }
}

/// Returns true if `path` has a project file extension
pub fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PROJECT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Find the only project file directly inside `dir`
pub fn find_project_file(dir: &Path) -> Result<PathBuf, ProjectError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ProjectError::read_error(dir, e))?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_project_file(path))
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(ProjectError::NoProjectFile {
            path: dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(ProjectError::AmbiguousProjectFile {
            path: dir.to_path_buf(),
            candidates: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

/// Extract `PackageReference` items from project XML.
///
/// The reference id comes from `Include`, falling back to `Update`. The
/// version comes from the `Version` attribute or a nested `<Version>`
/// element and may be a range, in which case its lower bound is used.
pub fn parse_references(content: &str, path: &Path) -> Result<Vec<PackageReference>, ProjectError> {
    let project: ProjectXml = quick_xml::de::from_str(content)
        .map_err(|e| ProjectError::xml_parse_error(path, e.to_string()))?;

    let mut seen = HashSet::new();
    let mut references = Vec::new();

    for item in project
        .item_groups
        .into_iter()
        .flat_map(|group| group.package_references)
    {
        let Some(id) = item
            .include
            .or(item.update)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
        else {
            debug!("Ignoring PackageReference without Include in {}", path.display());
            continue;
        };

        let version = item
            .version_attribute
            .or(item.version_element)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ProjectError::MissingVersion {
                path: path.to_path_buf(),
                package: id.clone(),
            })?;

        let invalid = |source: VersionError| ProjectError::InvalidVersion {
            path: path.to_path_buf(),
            package: id.clone(),
            source,
        };
        let range = VersionRange::parse(&version).map_err(invalid)?;
        let min = range
            .min_version()
            .cloned()
            .ok_or_else(|| invalid(VersionError::invalid_range(&version, "no lower bound")))?;

        if !seen.insert(package_key(&id)) {
            return Err(ProjectError::DuplicateReference {
                path: path.to_path_buf(),
                package: id,
            });
        }
        references.push(PackageReference::new(id, min));
    }

    Ok(references)
}
