//! Snapshot command handler.
//!
//! Prints the simulated dashboard state as JSON for scripting.

use anyhow::Result;
use chrono::Local;
use clap::ArgMatches;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::plant::{tick, SystemState};
use crate::ui::formatters::clock_label;

/// Execute the snapshot command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let ticks = matches.get_one::<u64>("ticks").copied().unwrap_or(0);
    let seed = matches.get_one::<u64>("seed").copied();
    let pretty = matches.get_flag("pretty");

    let mut state = SystemState::seed();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for _ in 0..ticks {
        tick(&mut state, &mut rng, clock_label(Local::now()));
    }

    let json = if pretty {
        serde_json::to_string_pretty(&state)?
    } else {
        serde_json::to_string(&state)?
    };
    println!("{}", json);

    Ok(())
}
