//! Environment configuration for the simulator binaries.
//!
//! Reads `BRACKET_MADNESS`, `BRACKET_SEED`, `BRACKET_SIMULATIONS`,
//! `BRACKET_OVERRIDES` and `RAYON_NUM_THREADS`.

use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::error::{BracketError, Result};
use crate::overrides::OverridesMap;
use crate::seed::MadnessLevel;
use crate::tournament::BracketSimulator;

/// Default number of brackets in a batch run
pub const DEFAULT_SIMULATIONS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub madness: MadnessLevel,
    pub seed: Option<u64>,
    pub simulations: usize,
    /// CSV of extra matchup overrides, layered on top of the historical ones
    pub overrides_path: Option<PathBuf>,
    /// `None` leaves the rayon default (one thread per core)
    pub threads: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            madness: MadnessLevel::default(),
            seed: None,
            simulations: DEFAULT_SIMULATIONS,
            overrides_path: None,
            threads: None,
        }
    }
}

impl SimConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let defaults = SimConfig::default();

        let madness = match lookup("BRACKET_MADNESS") {
            Some(raw) => MadnessLevel::new(parse_var("BRACKET_MADNESS", &raw)?)?,
            None => defaults.madness,
        };
        let seed = lookup("BRACKET_SEED")
            .map(|raw| parse_var("BRACKET_SEED", &raw))
            .transpose()?;
        let simulations = match lookup("BRACKET_SIMULATIONS") {
            Some(raw) => parse_var("BRACKET_SIMULATIONS", &raw)?,
            None => defaults.simulations,
        };
        let threads = lookup("RAYON_NUM_THREADS")
            .map(|raw| parse_var("RAYON_NUM_THREADS", &raw))
            .transpose()?;

        Ok(SimConfig {
            madness,
            seed,
            simulations,
            overrides_path: lookup("BRACKET_OVERRIDES").map(PathBuf::from),
            threads,
        })
    }

    /// Build the rayon global pool if a thread count was configured.
    /// Tolerates an already-initialized pool.
    pub fn init_threads(&self) {
        if let Some(n) = self.threads {
            if rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build_global()
                .is_ok()
            {
                info!(threads = n, "Configured rayon pool");
            }
        }
    }

    /// Historical overrides plus any from `overrides_path`.
    pub fn load_overrides(&self) -> Result<OverridesMap> {
        let mut overrides = OverridesMap::historical();
        if let Some(path) = &self.overrides_path {
            overrides.read_from_file(path)?;
            info!(path = %path.display(), count = overrides.len(), "Loaded overrides file");
        }
        Ok(overrides)
    }

    pub fn simulator(&self) -> Result<BracketSimulator> {
        Ok(BracketSimulator::new(self.load_overrides()?, self.seed))
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        BracketError::Config(format!("{} must be a number, got {:?}: {}", key, raw, e))
    })
}
