use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::constants::HISTORICAL_ODDS;
use crate::error::{BracketError, Result};
use crate::seed::{Matchup, Seed};

/// Fixed chalk probabilities for specific seed matchups.
///
/// Overrides are stored with the better seed first. When retrieving an
/// override, the probability is automatically flipped if the seeds are
/// provided in reverse order. An override replaces the chalk curve only;
/// madness still pulls it toward 0.5.
#[derive(Clone, Debug, Default)]
pub struct OverridesMap {
    overrides: HashMap<(Seed, Seed), f64>,
}

impl OverridesMap {
    pub fn new() -> Self {
        OverridesMap {
            overrides: HashMap::new(),
        }
    }

    /// Map preloaded with the historical 1v16 and 2v15 upset rates.
    pub fn historical() -> Self {
        let mut map = OverridesMap::new();
        for &(better, worse, prob) in HISTORICAL_ODDS.iter() {
            map.overrides
                .insert((Seed::from_field(better), Seed::from_field(worse)), prob);
        }
        map
    }

    /// Read overrides from a CSV file.
    /// Format: seed1,seed2,probability (probability that seed1 wins)
    pub fn read_from_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<()> {
        let file = File::open(filepath.as_ref())?;
        let reader = BufReader::new(file);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(BracketError::OverrideFile {
                    line: idx + 1,
                    message: format!("expected 3 fields, found {}", parts.len()),
                });
            }

            let parse_seed = |field: &str| -> Result<Seed> {
                let value: i64 = field.parse().map_err(|e| BracketError::OverrideFile {
                    line: idx + 1,
                    message: format!("invalid seed {:?}: {}", field, e),
                })?;
                Seed::new(value)
            };
            let seed1 = parse_seed(parts[0])?;
            let seed2 = parse_seed(parts[1])?;
            let prob: f64 = parts[2].parse().map_err(|e| BracketError::OverrideFile {
                line: idx + 1,
                message: format!("invalid probability {:?}: {}", parts[2], e),
            })?;

            self.add_override(seed1, seed2, prob)?;
        }

        debug!(count = self.overrides.len(), "Loaded matchup overrides");
        Ok(())
    }

    /// Add or update an override for a matchup.
    ///
    /// `prob` is the probability that `seed1` beats `seed2`.
    pub fn add_override(&mut self, seed1: Seed, seed2: Seed, prob: f64) -> Result<()> {
        // Also rejects NaN.
        if !(prob > 0.0 && prob < 1.0) {
            return Err(BracketError::InvalidProbability(prob));
        }
        let matchup = Matchup::new(seed1, seed2)?;
        let value = if seed1 == matchup.better() { prob } else { 1.0 - prob };
        self.overrides.insert((matchup.better(), matchup.worse()), value);
        Ok(())
    }

    /// Remove an override for a matchup.
    pub fn remove_override(&mut self, seed1: Seed, seed2: Seed) {
        self.overrides.remove(&ordered_key(seed1, seed2));
    }

    /// Get the override probability for a matchup, if one exists.
    /// Returns the probability of seed1 beating seed2.
    pub fn get(&self, seed1: Seed, seed2: Seed) -> Option<f64> {
        let flip = seed1 > seed2;
        self.overrides
            .get(&ordered_key(seed1, seed2))
            .map(|&p| if flip { 1.0 - p } else { p })
    }

    /// Check if an override exists for a matchup.
    pub fn has_override(&self, seed1: Seed, seed2: Seed) -> bool {
        self.overrides.contains_key(&ordered_key(seed1, seed2))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

fn ordered_key(seed1: Seed, seed2: Seed) -> (Seed, Seed) {
    if seed1 < seed2 {
        (seed1, seed2)
    } else {
        (seed2, seed1)
    }
}
