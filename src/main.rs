use anyhow::Result;
use clap::{Arg, Command};

use energize::commands;
use energize::ui::dashboard_tui::{run_dashboard_app, DashboardConfig};

fn main() -> Result<()> {
    energize::init_logging();

    let matches = Command::new("energize")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Factory energy-monitoring dashboard mockup")
        .subcommand(
            Command::new("dashboard")
                .about("Run the interactive energy dashboard")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Simulation tick interval in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("2000"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("DIR")
                        .help("Directory for exported reports"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed the simulation RNG for a reproducible session")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Write the CSV energy report without entering the TUI")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("DIR")
                        .help("Directory to write the report into"),
                )
                .arg(
                    Arg::new("ticks")
                        .short('t')
                        .long("ticks")
                        .value_name("N")
                        .help("Run N simulation ticks before building the report")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed the simulation RNG")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Print the simulated state as JSON for scripting")
                .arg(
                    Arg::new("ticks")
                        .short('t')
                        .long("ticks")
                        .value_name("N")
                        .help("Run N simulation ticks before printing")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed the simulation RNG")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("pretty")
                        .short('p')
                        .long("pretty")
                        .help("Pretty-print the JSON output")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("dashboard", sub_matches)) => commands::dashboard(sub_matches),
        Some(("report", sub_matches)) => commands::report(sub_matches),
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches),
        _ => run_dashboard_app(DashboardConfig::default()),
    }
}
