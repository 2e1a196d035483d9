use rand::Rng;
use std::collections::BTreeMap;
use tracing::trace;

use crate::overrides::OverridesMap;
use crate::seed::{MadnessLevel, Seed};
use crate::win_prob::calculate_win_prob;

/// Outcome distribution of one bracket slot: seed -> probability of occupying it.
pub type SlotOdds = BTreeMap<Seed, f64>;

/// Monte Carlo game resolution.
///
/// Draws exactly one uniform sample in [0, 1) and returns `seed_a` if it
/// falls below `seed_a`'s win probability, otherwise `seed_b`.
///
/// # Panics
/// If `seed_a == seed_b`.
pub fn resolve_game<R: Rng>(
    seed_a: Seed,
    seed_b: Seed,
    madness: MadnessLevel,
    overrides: Option<&OverridesMap>,
    rng: &mut R,
) -> Seed {
    let prob = calculate_win_prob(seed_a, seed_b, madness, overrides);
    let sample = rng.gen::<f64>();
    let winner = if sample < prob { seed_a } else { seed_b };
    trace!(%seed_a, %seed_b, prob, sample, %winner, "Resolved game");
    winner
}

/// Probabilistic game transformation.
///
/// Given the outcome distributions of two feeder slots, computes the
/// distribution of the slot their winner advances to.
///
/// # Arguments
/// * `child1` - First feeder's outcome distribution
/// * `child2` - Second feeder's outcome distribution
/// * `madness` - Chaos level
/// * `overrides` - Optional chalk overrides
///
/// # Returns
/// Map of seeds to their probability of advancing
pub fn game_transform_prob(
    child1: &SlotOdds,
    child2: &SlotOdds,
    madness: MadnessLevel,
    overrides: Option<&OverridesMap>,
) -> SlotOdds {
    let mut parent = SlotOdds::new();

    for (&seed1, &win1) in child1.iter() {
        for (&seed2, &win2) in child2.iter() {
            let game_prob = win1 * win2;
            let p1 = calculate_win_prob(seed1, seed2, madness, overrides);

            *parent.entry(seed1).or_insert(0.0) += game_prob * p1;
            *parent.entry(seed2).or_insert(0.0) += game_prob * (1.0 - p1);
        }
    }

    parent
}
