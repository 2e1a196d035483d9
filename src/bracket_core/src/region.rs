use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{REGION_FIELD, REGION_SIZE};
use crate::game::{game_transform_prob, resolve_game, SlotOdds};
use crate::overrides::OverridesMap;
use crate::seed::{MadnessLevel, Seed};

/// Results of one 16-seed region, round by round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionResult {
    pub region: String,
    /// Winners of the 8 opening games, in bracket order
    pub round_of_32: Vec<Seed>,
    /// Winners of the 4 second-round games
    pub sweet_16: Vec<Seed>,
    /// Winners of the 2 regional semifinals
    pub elite_8: Vec<Seed>,
    pub regional_champ: Seed,
}

/// The region's opening field in bracket order.
pub fn initial_field() -> [Seed; REGION_SIZE] {
    REGION_FIELD.map(Seed::from_field)
}

/// Play one round: adjacent entrants (0,1), (2,3), ... meet, winners keep their order.
fn play_round<R: Rng>(
    entrants: &[Seed],
    madness: MadnessLevel,
    overrides: Option<&OverridesMap>,
    rng: &mut R,
) -> Vec<Seed> {
    assert!(entrants.len() % 2 == 0, "round needs an even number of entrants");
    entrants
        .chunks_exact(2)
        .map(|pair| resolve_game(pair[0], pair[1], madness, overrides, rng))
        .collect()
}

/// Simulate one region with the historical matchup overrides.
pub fn simulate_region<R: Rng>(name: &str, madness: MadnessLevel, rng: &mut R) -> RegionResult {
    simulate_region_with_model(name, madness, Some(&OverridesMap::historical()), rng)
}

/// Simulate one region: 16 -> 8 -> 4 -> 2 -> 1.
pub fn simulate_region_with_model<R: Rng>(
    name: &str,
    madness: MadnessLevel,
    overrides: Option<&OverridesMap>,
    rng: &mut R,
) -> RegionResult {
    let field = initial_field();
    let round_of_32 = play_round(&field, madness, overrides, rng);
    let sweet_16 = play_round(&round_of_32, madness, overrides, rng);
    let elite_8 = play_round(&sweet_16, madness, overrides, rng);
    let regional_champ = resolve_game(elite_8[0], elite_8[1], madness, overrides, rng);

    debug!(region = name, %madness, %regional_champ, "Simulated region");

    RegionResult {
        region: name.to_string(),
        round_of_32,
        sweet_16,
        elite_8,
        regional_champ,
    }
}

/// Exact probability of each seed winning its game in each of the four rounds.
///
/// Index 0 is the round of 32 (winners of the opening games), index 3 the
/// regional champion. Each round's probabilities sum to its number of games.
pub fn advancement_odds(madness: MadnessLevel, overrides: Option<&OverridesMap>) -> Vec<SlotOdds> {
    let mut slots: Vec<SlotOdds> = initial_field()
        .iter()
        .map(|&seed| [(seed, 1.0)].into_iter().collect())
        .collect();
    let mut rounds = Vec::new();

    while slots.len() > 1 {
        slots = slots
            .chunks_exact(2)
            .map(|pair| game_transform_prob(&pair[0], &pair[1], madness, overrides))
            .collect();

        let mut round = SlotOdds::new();
        for slot in &slots {
            for (&seed, &prob) in slot {
                *round.entry(seed).or_insert(0.0) += prob;
            }
        }
        rounds.push(round);
    }

    rounds
}
