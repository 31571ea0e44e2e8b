//! Text output formatter for human-readable display
//!
//! This module provides:
//! - The available-updates banner and `<id>: <current> -> <latest>` lines
//! - Version change type indication in verbose mode
//! - Resolved and unresolved package listings in verbose mode

use crate::domain::{NuGetVersion, UpdateEntry};
use crate::orchestrator::RunReport;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

const BANNER_RULE: &str = "-------------------------";
const BANNER_TITLE: &str = "--- Available updates ---";

/// Which component of the version moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Fourth component only
    Revision,
    /// Same numeric version, different release labels
    Prerelease,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &NuGetVersion, new: &NuGetVersion) -> Self {
        if old.major != new.major {
            VersionChangeType::Major
        } else if old.minor != new.minor {
            VersionChangeType::Minor
        } else if old.patch != new.patch {
            VersionChangeType::Patch
        } else if old.revision != new.revision {
            VersionChangeType::Revision
        } else {
            VersionChangeType::Prerelease
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Revision => "revision".green().to_string(),
            VersionChangeType::Prerelease => "prerelease".cyan().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Revision => "revision",
            VersionChangeType::Prerelease => "prerelease",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with colors
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_color(verbosity, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn format_resolved(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let packages = &report.resolution.packages;
        let header = format!(
            "Resolved {} packages from {}",
            packages.len(),
            report.project.display()
        );
        if self.color {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{}", header)?;
        }

        let width = packages.iter().map(|p| p.id.len()).max().unwrap_or(0);
        for package in packages.iter() {
            if self.color {
                let name = format!("{:width$}", package.id, width = width);
                writeln!(writer, "  {} {}", name, package.version.to_string().dimmed())?;
            } else {
                writeln!(writer, "  {:width$} {}", package.id, package.version, width = width)?;
            }
        }

        if !report.resolution.unresolved.is_empty() {
            writeln!(writer)?;
            let header = "Not found in registry:";
            if self.color {
                writeln!(writer, "{}", header.yellow())?;
            } else {
                writeln!(writer, "{}", header)?;
            }
            for reference in &report.resolution.unresolved {
                writeln!(writer, "  {} {}", reference.id, reference.version)?;
            }
        }
        Ok(())
    }

    fn format_banner(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", BANNER_RULE)?;
        if self.color {
            writeln!(writer, "{}", BANNER_TITLE.bold())?;
        } else {
            writeln!(writer, "{}", BANNER_TITLE)?;
        }
        writeln!(writer, "{}", BANNER_RULE)?;
        writeln!(writer)
    }

    /// `<id>: <current> -> <latest>`, with change type and date when verbose
    fn format_update_line(
        &self,
        entry: &UpdateEntry,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.color {
            write!(
                writer,
                "{}: {} -> {}",
                entry.package_id.bold(),
                entry.current_version.to_string().dimmed(),
                entry.latest_version.to_string().bright_green().bold()
            )?;
        } else {
            write!(writer, "{}", entry)?;
        }

        if self.verbosity == Verbosity::Verbose {
            let change =
                VersionChangeType::from_versions(&entry.current_version, &entry.latest_version);
            let label = if self.color {
                change.colored_label()
            } else {
                change.label().to_string()
            };
            let date = entry
                .published
                .map(|d| format!(" ({})", d.format("%Y/%m/%d")))
                .unwrap_or_default();
            if self.color {
                write!(writer, " [{}]{}", label, date.dimmed())?;
            } else {
                write!(writer, " [{}]{}", label, date)?;
            }
        }
        writeln!(writer)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            for entry in &report.updates {
                self.format_update_line(entry, writer)?;
            }
            return Ok(());
        }

        if self.verbosity == Verbosity::Verbose {
            self.format_resolved(report, writer)?;
        }

        self.format_banner(writer)?;

        if report.updates.is_empty() {
            let message = "No updates available.";
            if self.color {
                writeln!(writer, "{}", message.green())?;
            } else {
                writeln!(writer, "{}", message)?;
            }
            return Ok(());
        }

        for entry in &report.updates {
            self.format_update_line(entry, writer)?;
        }
        Ok(())
    }
}
