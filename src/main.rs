//! Space Cats headless simulation runner.
//!
//! Runs the coin-collection simulation without a window and prints a summary
//! of the run. Useful for tuning the INI configuration and for soak testing.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config spacecats.ini --ticks 36000 --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use spacecats_sim::game::Simulation;
use spacecats_sim::resources::simconfig::SimConfig;

/// Space Cats headless simulation
#[derive(Parser)]
#[command(version, about = "Runs the Space Cats coin simulation without a window.")]
struct Cli {
    /// INI configuration file (default: ./spacecats.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Tick length in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for coin placement, overriding the configuration file.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

const PROGRESS_EVERY: u64 = 600;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => SimConfig::with_path(path),
        None => SimConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    for tick in 1..=cli.ticks {
        sim.tick(cli.dt);
        if tick % PROGRESS_EVERY == 0 {
            info!(
                "tick {}: score={} coins={} player box={:?}",
                tick,
                sim.score(),
                sim.coin_count(),
                sim.player_box()
            );
        }
    }

    let report = sim.report();
    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("{report}");
    }
}
