//! nuget-updater - NuGet dependency resolution and update checking library
//!
//! This library provides:
//! - Reading declared package references from MSBuild project files
//! - Resolving the transitive dependency closure against a NuGet V3 feed
//! - Reporting resolved packages that have newer published versions

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod project;
pub mod registry;
pub mod resolver;
pub mod update;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
