use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::REGION_NAMES;
use crate::overrides::OverridesMap;
use crate::region::{simulate_region_with_model, RegionResult};
use crate::seed::{MadnessLevel, Seed};
use crate::win_prob::calculate_win_prob;

/// A seed together with the region its run started in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub region: String,
    pub seed: Seed,
}

impl TeamRef {
    pub fn champion_of(region: &RegionResult) -> Self {
        TeamRef {
            region: region.region.clone(),
            seed: region.regional_champ,
        }
    }
}

/// Winners of the left (top-left vs bottom-left) and right semifinals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalFour {
    pub left: TeamRef,
    pub right: TeamRef,
}

/// A complete simulated tournament.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResult {
    pub top_left: RegionResult,
    pub bottom_left: RegionResult,
    pub top_right: RegionResult,
    pub bottom_right: RegionResult,
    pub final_four: FinalFour,
    pub national_champion: TeamRef,
}

impl BracketResult {
    /// Regions in bracket order
    pub fn regions(&self) -> [&RegionResult; 4] {
        [&self.top_left, &self.bottom_left, &self.top_right, &self.bottom_right]
    }

    /// Look up a region by display name
    pub fn region(&self, name: &str) -> Option<&RegionResult> {
        self.regions().into_iter().find(|r| r.region == name)
    }
}

/// Resolve a game between two regional entrants.
///
/// Champions of different regions can share a seed; that pairing is a fair
/// coin flip. The winner keeps its region, so provenance never depends on
/// the seed value alone.
fn play_entrants<R: Rng>(
    a: &TeamRef,
    b: &TeamRef,
    madness: MadnessLevel,
    overrides: Option<&OverridesMap>,
    rng: &mut R,
) -> TeamRef {
    let prob = if a.seed == b.seed {
        0.5
    } else {
        calculate_win_prob(a.seed, b.seed, madness, overrides)
    };
    let sample = rng.gen::<f64>();
    let winner = if sample < prob { a } else { b };
    trace!(
        a_region = a.region.as_str(),
        a_seed = %a.seed,
        b_region = b.region.as_str(),
        b_seed = %b.seed,
        prob,
        winner = winner.region.as_str(),
        "Resolved national game"
    );
    winner.clone()
}

/// Simulate a full bracket with the historical matchup overrides.
pub fn simulate_bracket<R: Rng>(madness: MadnessLevel, rng: &mut R) -> BracketResult {
    simulate_bracket_with_model(madness, Some(&OverridesMap::historical()), rng)
}

/// Simulate four regions, the Final Four and the championship game.
pub fn simulate_bracket_with_model<R: Rng>(
    madness: MadnessLevel,
    overrides: Option<&OverridesMap>,
    rng: &mut R,
) -> BracketResult {
    let [top_left, bottom_left, top_right, bottom_right] =
        REGION_NAMES.map(|name| simulate_region_with_model(name, madness, overrides, rng));

    let left = play_entrants(
        &TeamRef::champion_of(&top_left),
        &TeamRef::champion_of(&bottom_left),
        madness,
        overrides,
        rng,
    );
    let right = play_entrants(
        &TeamRef::champion_of(&top_right),
        &TeamRef::champion_of(&bottom_right),
        madness,
        overrides,
        rng,
    );
    let national_champion = play_entrants(&left, &right, madness, overrides, rng);

    debug!(
        %madness,
        champion_region = national_champion.region.as_str(),
        champion_seed = %national_champion.seed,
        "Simulated bracket"
    );

    BracketResult {
        top_left,
        bottom_left,
        top_right,
        bottom_right,
        final_four: FinalFour { left, right },
        national_champion,
    }
}
