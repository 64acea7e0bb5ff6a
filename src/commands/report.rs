//! Report command handler.
//!
//! Builds the CSV energy report from the simulated state and writes it to
//! disk without entering the TUI.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::ArgMatches;
use colored::*;
use dialoguer::Confirm;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::plant::{export_to, report_filename, tick, FileSink, SystemState};
use crate::ui::formatters::clock_label;

/// Execute the report command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let output_dir = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let ticks = matches.get_one::<u64>("ticks").copied().unwrap_or(0);
    let seed = matches.get_one::<u64>("seed").copied();

    let mut state = SystemState::seed();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for _ in 0..ticks {
        tick(&mut state, &mut rng, clock_label(Local::now()));
    }

    let now = Local::now();
    let target = output_dir.join(report_filename(now.date_naive()));
    if target.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", target.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", "Report export cancelled.".yellow());
            return Ok(());
        }
    }

    let mut sink = FileSink::new(output_dir);
    let written = export_to(&mut sink, &state, now)?;

    log::debug!("report written after {} simulated ticks", ticks);
    println!("{} {}", "Report written:".green().bold(), written.display());
    Ok(())
}
