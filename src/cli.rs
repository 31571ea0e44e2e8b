//! CLI argument parsing module for nuget-updater

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Resolve NuGet dependency closures and report available updates
#[derive(Parser, Debug, Clone)]
#[command(
    name = "nuget-updater",
    version,
    about = "Resolve NuGet dependency closures and report available updates"
)]
pub struct CliArgs {
    /// Project file, or a directory containing exactly one project file
    #[arg(default_value = ".")]
    pub project: PathBuf,

    /// NuGet V3 service index URL
    #[arg(short, long, env = "NUGET_UPDATER_SOURCE")]
    pub source: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Offer prerelease versions as updates
    #[arg(long)]
    pub prerelease: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors and the update lines
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Progress bars only make sense for plain interactive output
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.verbose == 0 && !self.json
    }
}
