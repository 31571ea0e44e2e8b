//! Progress display for resolution and update checks
//!
//! Resolution has no known length, so it gets a spinner. The update check
//! walks the resolved map and gets a bar.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";
const BAR_TEMPLATE: &str = "{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}";

/// Progress reporter for one run
pub struct Progress {
    /// Disabled in quiet, verbose and JSON modes
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// A reporter that never draws anything
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Spinner shown while walking the dependency graph
    pub fn start_resolving(&mut self, declared: usize) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template(SPINNER_TEMPLATE)
        {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Resolving {} declared packages", declared));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Report the package currently being explored
    pub fn exploring(&self, id: &str, version: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("Exploring {} {}", id, version));
        }
    }

    /// Bar shown while looking up the latest version of each resolved package
    pub fn start_checking(&mut self, total: usize) {
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        bar.set_message("Checking updates");
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Report the package whose versions are being fetched
    pub fn checking(&self, id: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("Checking {}", id));
        }
    }

    /// Advance the update-check bar by one package
    pub fn inc(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Clear the current spinner or bar
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish();
    }
}
