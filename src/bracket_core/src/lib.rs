//! Bracket Core - seed-based single-elimination tournament simulator.
//!
//! Resolves 16-seed regions game by game with a madness-tunable win
//! probability model, then plays the Final Four and championship.
//! Python bindings are available behind the `python` feature.

pub mod bracket;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod overrides;
pub mod region;
pub mod seed;
pub mod tournament;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use bracket::{simulate_bracket, simulate_bracket_with_model, BracketResult, FinalFour, TeamRef};
pub use config::SimConfig;
pub use constants::{DEFAULT_MADNESS, REGION_FIELD, REGION_KEYS, REGION_NAMES, STATUS_MESSAGE};
pub use error::{BracketError, Result};
pub use game::{game_transform_prob, resolve_game, SlotOdds};
pub use overrides::OverridesMap;
pub use region::{advancement_odds, simulate_region, simulate_region_with_model, RegionResult};
pub use seed::{MadnessLevel, Matchup, Seed};
pub use tournament::{BracketSimulator, SimulationSummary};
pub use win_prob::{calculate_win_prob, chalk_prob};
