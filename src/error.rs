//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ProjectError: Issues reading declared references from the project file
//! - RegistryError: Issues with package registry communication
//! - VersionError: Unparseable versions and version ranges
//! - ConfigError: Issues with configuration files and CLI options
//! - UpdateError: Failures of the update check phase

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Project file related errors
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Update check related errors
    #[error(transparent)]
    Update(#[from] UpdateError),
}

impl AppError {
    /// Process exit code for this failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Project(_) => 3,
            AppError::Registry(_) => 4,
            AppError::Update(UpdateError::EmptyVersionSet { .. }) => 5,
            AppError::Update(UpdateError::Registry(_)) => 4,
        }
    }
}

/// Errors related to reading the project file
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Project file or directory not found
    #[error("project not found: {path}")]
    NotFound { path: PathBuf },

    /// Directory contains no project file
    #[error("no project file (*.csproj, *.fsproj, *.vbproj) found in {path}")]
    NoProjectFile { path: PathBuf },

    /// Directory contains more than one project file
    #[error("multiple project files found in {path}: {}", .candidates.join(", "))]
    AmbiguousProjectFile {
        path: PathBuf,
        candidates: Vec<String>,
    },

    /// Failed to read project file
    #[error("failed to read project file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed project XML
    #[error("failed to parse XML in {path}: {message}")]
    XmlParseError { path: PathBuf, message: String },

    /// PackageReference without a version
    #[error("package reference '{package}' in {path} has no version")]
    MissingVersion { path: PathBuf, package: String },

    /// PackageReference with an unparseable version
    #[error("package reference '{package}' in {path}: {source}")]
    InvalidVersion {
        path: PathBuf,
        package: String,
        #[source]
        source: VersionError,
    },

    /// The same package id is declared twice
    #[error("package '{package}' is referenced more than once in {path}")]
    DuplicateReference { path: PathBuf, package: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// The service index does not advertise a usable resource
    #[error("service index at {source_url} is unusable: {message}")]
    ServiceIndex { source_url: String, message: String },
}

/// Errors related to version strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Invalid version
    #[error("invalid version '{value}': {message}")]
    InvalidVersion { value: String, message: String },

    /// Invalid version range
    #[error("invalid version range '{value}': {message}")]
    InvalidRange { value: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Invalid package source URL
    #[error("invalid package source '{value}': expected an http(s) URL")]
    InvalidSource { value: String },

    /// Zero request timeout
    #[error("invalid timeout_secs: must be greater than zero")]
    ZeroTimeout,

    /// Framework table with no entries
    #[error("framework preference table in {path} is empty")]
    EmptyFrameworkTable { path: PathBuf },
}

/// Errors raised while checking resolved packages for updates
#[derive(Error, Debug)]
pub enum UpdateError {
    /// A resolved package has no eligible versions in the registry
    #[error("registry returned no versions for resolved package '{package}'")]
    EmptyVersionSet { package: String },

    /// Registry failure during the update check
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ProjectError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProjectError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new XmlParseError
    pub fn xml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ProjectError::XmlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Returns true for a 404-style "not found" response
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }
}

impl VersionError {
    /// Creates a new InvalidVersion error
    pub fn invalid_version(value: impl Into<String>, message: impl Into<String>) -> Self {
        VersionError::InvalidVersion {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidRange error
    pub fn invalid_range(value: impl Into<String>, message: impl Into<String>) -> Self {
        VersionError::InvalidRange {
            value: value.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_error_no_project_file() {
        let err = ProjectError::NoProjectFile {
            path: PathBuf::from("/src/app"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("no project file"));
        assert!(msg.contains("/src/app"));
    }

    #[test]
    fn test_project_error_ambiguous() {
        let err = ProjectError::AmbiguousProjectFile {
            path: PathBuf::from("/src"),
            candidates: vec!["A.csproj".to_string(), "B.csproj".to_string()],
        };
        assert!(err.to_string().contains("A.csproj, B.csproj"));
    }

    #[test]
    fn test_project_error_xml_parse() {
        let err = ProjectError::xml_parse_error("/src/App.csproj", "unexpected end");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse XML"));
        assert!(msg.contains("unexpected end"));
    }

    #[test]
    fn test_project_error_invalid_version_keeps_source() {
        let err = ProjectError::InvalidVersion {
            path: PathBuf::from("App.csproj"),
            package: "Foo".to_string(),
            source: VersionError::invalid_version("x.y", "invalid numeric component"),
        };
        assert!(err.to_string().contains("Foo"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("Newtonsoft.Json", "nuget.org");
        let msg = format!("{}", err);
        assert!(msg.contains("package 'Newtonsoft.Json' not found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("Serilog", "nuget.org", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("Serilog", "nuget.org");
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_version_error_display() {
        let err = VersionError::invalid_range("[1.0", "missing closing bracket");
        assert_eq!(
            err.to_string(),
            "invalid version range '[1.0': missing closing bracket"
        );
    }

    #[test]
    fn test_update_error_empty_version_set() {
        let err = UpdateError::EmptyVersionSet {
            package: "Gone.Package".to_string(),
        };
        assert!(err.to_string().contains("Gone.Package"));
    }

    #[test]
    fn test_exit_codes() {
        let config: AppError = ConfigError::InvalidSource {
            value: "ftp://x".to_string(),
        }
        .into();
        assert_eq!(config.exit_code(), 2);

        let project: AppError = ProjectError::NotFound {
            path: PathBuf::from("x"),
        }
        .into();
        assert_eq!(project.exit_code(), 3);

        let registry: AppError = RegistryError::timeout("a", "b").into();
        assert_eq!(registry.exit_code(), 4);

        let update_registry: AppError =
            UpdateError::from(RegistryError::timeout("a", "b")).into();
        assert_eq!(update_registry.exit_code(), 4);

        let empty: AppError = UpdateError::EmptyVersionSet {
            package: "a".to_string(),
        }
        .into();
        assert_eq!(empty.exit_code(), 5);
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let registry_err = RegistryError::package_not_found("pkg", "nuget.org");
        let app_err: AppError = registry_err.into();
        assert!(app_err.to_string().contains("package 'pkg' not found"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = ProjectError::NotFound {
            path: PathBuf::from("/test"),
        };
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}
