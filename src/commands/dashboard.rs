//! Dashboard command handler.
//!
//! Runs the interactive energy dashboard in a TUI.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::ui::dashboard_tui::{run_dashboard_app, DashboardConfig};

/// Execute the dashboard command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let interval = matches.get_one::<u64>("interval").copied().unwrap_or(2000);
    let output_dir = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let seed = matches.get_one::<u64>("seed").copied();

    let config = DashboardConfig {
        interval: Duration::from_millis(interval),
        output_dir,
        seed,
    };

    log::debug!("starting dashboard with tick interval {}ms", interval);
    run_dashboard_app(config).context("Failed to run energy dashboard")
}
