//! Transitive dependency resolution
//!
//! Walks the dependency graph depth-first from the declared references and
//! records, for every package, the highest version reached. A package is only
//! re-explored when it is reached at a strictly higher version, so cycles
//! terminate and diamonds settle on the higher version.
//!
//! The walk uses an explicit worklist instead of recursion. Children are
//! pushed in reverse so they pop in declaration order.

mod preference;

pub use preference::FrameworkPreference;

use crate::domain::{PackageReference, ResolvedVersionMap};
use crate::error::RegistryError;
use crate::progress::Progress;
use crate::registry::RegistryClient;
use tracing::{debug, info, warn};

/// Outcome of a resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Effective version per package
    pub packages: ResolvedVersionMap,
    /// References the registry did not know, in the order they were met
    pub unresolved: Vec<PackageReference>,
}

/// Pending visit on the worklist
#[derive(Debug)]
struct Visit {
    reference: PackageReference,
    requested_by: Option<String>,
}

/// Dependency-closure resolver
pub struct Resolver<'a> {
    registry: &'a dyn RegistryClient,
    preference: &'a FrameworkPreference,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a dyn RegistryClient, preference: &'a FrameworkPreference) -> Self {
        Self {
            registry,
            preference,
        }
    }

    /// Resolve the closure of `declared`.
    ///
    /// A package the registry does not know is dropped from the result with a
    /// warning. Any other registry failure aborts the run.
    pub async fn resolve(
        &self,
        declared: &[PackageReference],
        progress: &Progress,
    ) -> Result<Resolution, RegistryError> {
        let mut resolution = Resolution::default();
        let mut stack: Vec<Visit> = declared
            .iter()
            .rev()
            .map(|reference| Visit {
                reference: reference.clone(),
                requested_by: None,
            })
            .collect();

        while let Some(visit) = stack.pop() {
            let children = self.visit(visit, &mut resolution, progress).await?;
            stack.extend(children.into_iter().rev());
        }

        Ok(resolution)
    }

    /// Handle one worklist entry and return its children in declaration order
    async fn visit(
        &self,
        visit: Visit,
        resolution: &mut Resolution,
        progress: &Progress,
    ) -> Result<Vec<Visit>, RegistryError> {
        let PackageReference { id, version } = &visit.reference;

        if let Some(recorded) = resolution.packages.get(id) {
            if recorded >= version {
                debug!("Skipping {} ({}): {} already recorded", id, version, recorded);
                return Ok(Vec::new());
            }
        }

        resolution.packages.record(id, version.clone());
        info!("Exploring package: {} ({})", id, version);
        progress.exploring(id, &version.to_string());

        let Some(metadata) = self.registry.get_metadata(id, version).await? else {
            match &visit.requested_by {
                Some(parent) => warn!("Package {} ({}) not found, required by {}.", id, version, parent),
                None => warn!("Package {} ({}) not found.", id, version),
            }
            resolution.packages.remove(id);
            resolution.unresolved.push(visit.reference);
            return Ok(Vec::new());
        };

        // Keep the registry's casing for display
        resolution.packages.record(&metadata.id, version.clone());

        let Some(group) = self.preference.select(&metadata.dependency_groups) else {
            if !metadata.dependency_groups.is_empty() {
                debug!("{} ({}) has no dependency group for a ranked framework", id, version);
            }
            return Ok(Vec::new());
        };
        debug!(
            "{} ({}): using dependency group {}",
            metadata.id, version, group.target_framework
        );

        let children = group
            .dependencies
            .iter()
            .filter_map(|dependency| match dependency.range.min_version() {
                Some(min) => Some(Visit {
                    reference: PackageReference::new(&dependency.id, min.clone()),
                    requested_by: Some(metadata.id.clone()),
                }),
                None => {
                    debug!(
                        "Skipping {} required by {}: range {} has no lower bound",
                        dependency.id, metadata.id, dependency.range
                    );
                    None
                }
            })
            .collect();

        Ok(children)
    }
}
