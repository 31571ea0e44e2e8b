//! Run configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then CLI flags.
//!
//! ```toml
//! source = "https://api.nuget.org/v3/index.json"
//! timeout_secs = 30
//! max_retries = 0
//! include_prerelease = false
//!
//! [frameworks]
//! ".NETFramework" = 0
//! ".NETStandard" = 10
//! "Any" = 100
//! ```

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::registry::{DEFAULT_MAX_RETRIES, DEFAULT_SOURCE, DEFAULT_TIMEOUT};
use crate::resolver::FrameworkPreference;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Effective configuration for one run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// NuGet V3 service index URL
    pub source: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Extra attempts after a 429 response
    pub max_retries: u32,
    /// Offer prerelease versions as updates
    pub include_prerelease: bool,
    /// Replacement framework preference table
    pub frameworks: Option<BTreeMap<String, i32>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_retries: DEFAULT_MAX_RETRIES,
            include_prerelease: false,
            frameworks: None,
        }
    }
}

impl Config {
    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Parse TOML content; `path` is only used in error messages
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if config.frameworks.as_ref().is_some_and(|table| table.is_empty()) {
            return Err(ConfigError::EmptyFrameworkTable {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    /// Build the configuration for a CLI invocation
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(args.source.clone(), args.prerelease);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides on top of file values
    pub fn with_overrides(mut self, source: Option<String>, include_prerelease: bool) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        self.include_prerelease |= include_prerelease;
        self
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.source.starts_with("http://") || self.source.starts_with("https://")) {
            return Err(ConfigError::InvalidSource {
                value: self.source.clone(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Framework table from the file, or the built-in one
    pub fn framework_preference(&self) -> FrameworkPreference {
        match &self.frameworks {
            Some(table) => FrameworkPreference::new(
                table.iter().map(|(family, rank)| (family.clone(), *rank)),
            ),
            None => FrameworkPreference::default(),
        }
    }
}
