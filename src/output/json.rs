//! JSON output formatter for machine processing

use crate::domain::{PackageReference, ResolvedVersionMap, UpdateEntry};
use crate::orchestrator::RunReport;
use crate::output::text::VersionChangeType;
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbose mode adds the change type to each update
    verbosity: Verbosity,
}

impl JsonFormatter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    project: String,
    resolved: &'a ResolvedVersionMap,
    unresolved: &'a [PackageReference],
    updates: Vec<JsonUpdate<'a>>,
}

#[derive(Serialize)]
struct JsonUpdate<'a> {
    #[serde(flatten)]
    entry: &'a UpdateEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    change: Option<&'static str>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let verbose = self.verbosity == Verbosity::Verbose;
        let output = JsonOutput {
            project: report.project.display().to_string(),
            resolved: &report.resolution.packages,
            unresolved: &report.resolution.unresolved,
            updates: report
                .updates
                .iter()
                .map(|entry| JsonUpdate {
                    entry,
                    change: verbose.then(|| {
                        VersionChangeType::from_versions(
                            &entry.current_version,
                            &entry.latest_version,
                        )
                        .label()
                    }),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
