//! nuget-updater - NuGet dependency closure and update checker CLI
//!
//! Reads the package references of an MSBuild project, resolves their
//! transitive dependencies against a NuGet V3 feed and lists the packages
//! that have newer versions.

use clap::Parser;
use nuget_updater::cli::CliArgs;
use nuget_updater::config::Config;
use nuget_updater::error::AppError;
use nuget_updater::orchestrator::Orchestrator;
use nuget_updater::output::{create_formatter, OutputConfig};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| args.log_level().to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        )
        .init();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = e.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let color = !args.no_color && io::stdout().is_terminal();
    colored::control::set_override(color);

    let config = Config::from_cli(&args).map_err(AppError::from)?;
    tracing::info!("Using package source {}", config.source);

    let orchestrator = Orchestrator::new(config)?;
    let show_progress = args.show_progress() && io::stderr().is_terminal();
    let report = orchestrator.run(&args.project, show_progress).await?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose > 0, args.quiet, color);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
