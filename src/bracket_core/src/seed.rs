use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_MADNESS, MAX_MADNESS, MAX_SEED, MIN_MADNESS, MIN_SEED};
use crate::error::{BracketError, Result};

/// Tournament seed of a competitor (1 = best, 16 = worst).
///
/// A seed is the only identity a team has; the same number appears once in
/// each region's field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Seed(u8);

impl Seed {
    pub fn new(value: i64) -> Result<Self> {
        if value < MIN_SEED as i64 || value > MAX_SEED as i64 {
            return Err(BracketError::InvalidSeed(value));
        }
        Ok(Seed(value as u8))
    }

    /// Build a seed from a value already known to be in range (e.g. a field constant)
    pub(crate) const fn from_field(value: u8) -> Self {
        Seed(value)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Seed {
    type Error = BracketError;

    fn try_from(value: i64) -> Result<Self> {
        Seed::new(value)
    }
}

impl From<Seed> for u8 {
    fn from(seed: Seed) -> u8 {
        seed.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How strongly seeding predicts results, from 0 (chalk) to 10 (chaos).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct MadnessLevel(u8);

impl MadnessLevel {
    pub fn new(value: i64) -> Result<Self> {
        if value < MIN_MADNESS as i64 || value > MAX_MADNESS as i64 {
            return Err(BracketError::InvalidMadness(value));
        }
        Ok(MadnessLevel(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Normalized chaos fraction in [0, 1]
    pub fn chaos(self) -> f64 {
        f64::from(self.0) / f64::from(MAX_MADNESS)
    }

    pub fn max() -> Self {
        MadnessLevel(MAX_MADNESS)
    }

    /// Every level from chalk to chaos, ascending
    pub fn all() -> impl Iterator<Item = MadnessLevel> {
        (MIN_MADNESS..=MAX_MADNESS).map(MadnessLevel)
    }
}

impl Default for MadnessLevel {
    fn default() -> Self {
        MadnessLevel(DEFAULT_MADNESS)
    }
}

impl TryFrom<i64> for MadnessLevel {
    type Error = BracketError;

    fn try_from(value: i64) -> Result<Self> {
        MadnessLevel::new(value)
    }
}

impl From<MadnessLevel> for u8 {
    fn from(level: MadnessLevel) -> u8 {
        level.0
    }
}

impl fmt::Display for MadnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two distinct seeds, ordered better-first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Matchup {
    better: Seed,
    worse: Seed,
}

impl Matchup {
    pub fn new(a: Seed, b: Seed) -> Result<Self> {
        if a == b {
            return Err(BracketError::EqualSeeds(a.get()));
        }
        Ok(Matchup::ordered(a, b))
    }

    /// Order two seeds already known to differ.
    pub(crate) fn ordered(a: Seed, b: Seed) -> Self {
        debug_assert_ne!(a, b);
        Matchup {
            better: a.min(b),
            worse: a.max(b),
        }
    }

    pub fn better(&self) -> Seed {
        self.better
    }

    pub fn worse(&self) -> Seed {
        self.worse
    }

    /// Difference in seed lines, always positive
    pub fn gap(&self) -> u8 {
        self.worse.get() - self.better.get()
    }
}
