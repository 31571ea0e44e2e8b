//! Orchestrator for one update-check run
//!
//! Workflow: read project → resolve closure → check updates → report.
//! Registry calls are made one at a time; the first fatal error ends the
//! run without a partial report.

use crate::config::Config;
use crate::domain::{PackageReference, UpdateEntry};
use crate::error::AppError;
use crate::progress::Progress;
use crate::project::ProjectFile;
use crate::registry::{HttpClient, NuGetRegistry, RegistryClient, DEFAULT_USER_AGENT};
use crate::resolver::{Resolution, Resolver};
use crate::update::{UpdateChecker, UpdateFilter};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a formatter needs to present a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Project file that was read
    pub project: PathBuf,
    /// References declared by the project
    pub declared: Vec<PackageReference>,
    /// Resolved closure
    pub resolution: Resolution,
    /// Available updates, sorted by package id
    pub updates: Vec<UpdateEntry>,
}

/// Coordinates the run against one registry
pub struct Orchestrator {
    config: Config,
    registry: Box<dyn RegistryClient>,
}

impl Orchestrator {
    /// Create an orchestrator talking to the configured NuGet source
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = HttpClient::with_config(config.timeout(), DEFAULT_USER_AGENT)?
            .with_max_retries(config.max_retries);
        let registry = NuGetRegistry::new(client, config.source.clone());

        Ok(Self::with_registry(config, Box::new(registry)))
    }

    /// Create an orchestrator with a custom registry (for testing)
    pub fn with_registry(config: Config, registry: Box<dyn RegistryClient>) -> Self {
        Self { config, registry }
    }

    /// Run the workflow for a project file or directory
    pub async fn run(&self, project: &Path, show_progress: bool) -> Result<RunReport, AppError> {
        let project = ProjectFile::load(project)?;
        info!(
            "Loaded {} package references from {}",
            project.references.len(),
            project.path.display()
        );

        let mut progress = Progress::new(show_progress);

        progress.start_resolving(project.references.len());
        let preference = self.config.framework_preference();
        let resolution = Resolver::new(self.registry.as_ref(), &preference)
            .resolve(&project.references, &progress)
            .await?;
        progress.finish();
        info!(
            "Resolved {} packages ({} not found)",
            resolution.packages.len(),
            resolution.unresolved.len()
        );

        progress.start_checking(resolution.packages.len());
        let filter = UpdateFilter::new().with_include_prerelease(self.config.include_prerelease);
        let updates = UpdateChecker::new(self.registry.as_ref(), filter)
            .check_updates(&resolution.packages, &progress)
            .await?;
        progress.finish();

        Ok(RunReport {
            project: project.path,
            declared: project.references,
            resolution,
            updates,
        })
    }
}
