use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bracket_core::constants::ROUND_NAMES;
use bracket_core::{MadnessLevel, SimConfig};

#[derive(Parser)]
#[command(name = "simulate", about = "Seed-based March Madness bracket simulator")]
struct Cli {
    /// Madness level 0 (chalk) to 10 (coin flips); overrides BRACKET_MADNESS
    #[arg(long, global = true)]
    madness: Option<i64>,

    /// RNG seed for reproducible output; overrides BRACKET_SEED
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Matchup overrides CSV (seed1,seed2,probability); overrides BRACKET_OVERRIDES
    #[arg(long, global = true)]
    overrides: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a full bracket and print it as JSON
    Bracket,
    /// Simulate a single region
    Region {
        #[arg(long, default_value = "Top Left")]
        name: String,
    },
    /// Run many brackets and print aggregate counts
    Batch {
        /// Number of brackets; overrides BRACKET_SIMULATIONS
        #[arg(long)]
        simulations: Option<usize>,
    },
    /// Print exact per-round advancement probabilities for one region
    Odds,
}

#[derive(Serialize)]
struct OddsRow {
    seed: u8,
    #[serde(flatten)]
    rounds: BTreeMap<&'static str, f64>,
}

/// `RUST_LOG` plus info-level output for the library and this binary.
fn log_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("bracket_core=info".parse()?)
        .add_directive("simulate=info".parse()?))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter()?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SimConfig::from_env().context("Failed to load configuration")?;
    if let Some(level) = cli.madness {
        config.madness = MadnessLevel::new(level)?;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.overrides.is_some() {
        config.overrides_path = cli.overrides;
    }
    config.init_threads();

    let simulator = config
        .simulator()
        .context("Failed to load matchup overrides")?;
    info!(madness = %config.madness, seed = ?config.seed, "Bracket simulator starting");

    let output = match cli.command {
        Command::Bracket => {
            serde_json::to_string_pretty(&simulator.simulate_bracket(config.madness))?
        }
        Command::Region { name } => {
            serde_json::to_string_pretty(&simulator.simulate_region(&name, config.madness))?
        }
        Command::Batch { simulations } => {
            let n = simulations.unwrap_or(config.simulations);
            serde_json::to_string_pretty(&simulator.run_simulations(n, config.madness))?
        }
        Command::Odds => {
            let rounds = simulator.advancement_odds(config.madness);
            let mut rows: BTreeMap<u8, OddsRow> = BTreeMap::new();
            for (round_name, round) in ROUND_NAMES.iter().zip(&rounds) {
                for (seed, prob) in round {
                    rows.entry(seed.get())
                        .or_insert_with(|| OddsRow {
                            seed: seed.get(),
                            rounds: BTreeMap::new(),
                        })
                        .rounds
                        .insert(*round_name, *prob);
                }
            }
            serde_json::to_string_pretty(&rows.into_values().collect::<Vec<_>>())?
        }
    };

    println!("{}", output);
    Ok(())
}
