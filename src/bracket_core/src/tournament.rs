use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::bracket::{simulate_bracket_with_model, BracketResult};
use crate::game::SlotOdds;
use crate::overrides::OverridesMap;
use crate::region::{advancement_odds, simulate_region_with_model, RegionResult};
use crate::seed::{MadnessLevel, Seed};

/// Matchup model plus seeding policy shared by every simulation it runs.
#[derive(Clone, Debug)]
pub struct BracketSimulator {
    /// Fixed chalk probabilities for specific matchups
    pub overrides: OverridesMap,

    /// RNG seed; `None` draws from OS entropy on every call
    pub seed: Option<u64>,
}

/// Aggregate outcome of many independent brackets.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub simulations: usize,
    pub madness: u8,
    /// National titles won per seed
    pub champion_seeds: BTreeMap<Seed, usize>,
    /// National titles won per region
    pub champion_regions: BTreeMap<String, usize>,
    /// Final Four appearances per seed (both halves)
    pub final_four_seeds: BTreeMap<Seed, usize>,
    pub mean_champion_seed: f64,
}

impl Default for BracketSimulator {
    fn default() -> Self {
        BracketSimulator::new(OverridesMap::historical(), None)
    }
}

impl BracketSimulator {
    pub fn new(overrides: OverridesMap, seed: Option<u64>) -> Self {
        BracketSimulator { overrides, seed }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Simulate one region.
    pub fn simulate_region(&self, name: &str, madness: MadnessLevel) -> RegionResult {
        let mut rng = self.rng();
        simulate_region_with_model(name, madness, Some(&self.overrides), &mut rng)
    }

    /// Simulate a full bracket once.
    pub fn simulate_bracket(&self, madness: MadnessLevel) -> BracketResult {
        let mut rng = self.rng();
        simulate_bracket_with_model(madness, Some(&self.overrides), &mut rng)
    }

    /// Exact per-round advancement probabilities for one region.
    pub fn advancement_odds(&self, madness: MadnessLevel) -> Vec<SlotOdds> {
        advancement_odds(madness, Some(&self.overrides))
    }

    /// Run multiple Monte Carlo brackets in parallel.
    ///
    /// Each bracket gets its own generator seeded from a master stream, so
    /// the summary for a fixed seed does not depend on the thread count.
    /// Brackets are folded into per-thread summaries as they finish.
    pub fn run_simulations(
        &self,
        n_simulations: usize,
        madness: MadnessLevel,
    ) -> SimulationSummary {
        let mut rng = self.rng();
        let sim_seeds: Vec<u64> = (0..n_simulations).map(|_| rng.gen::<u64>()).collect();

        let mut summary = sim_seeds
            .par_iter()
            .fold(
                || SimulationSummary::new(madness),
                |mut acc, &sim_seed| {
                    acc.record(&self.simulate_seeded(sim_seed, madness));
                    acc
                },
            )
            .reduce(|| SimulationSummary::new(madness), SimulationSummary::merge);
        summary.finish();

        info!(
            simulations = summary.simulations,
            %madness,
            mean_champion_seed = summary.mean_champion_seed,
            "Finished simulation batch"
        );
        summary
    }

    fn simulate_seeded(&self, sim_seed: u64, madness: MadnessLevel) -> BracketResult {
        let mut sim_rng = ChaCha8Rng::seed_from_u64(sim_seed);
        simulate_bracket_with_model(madness, Some(&self.overrides), &mut sim_rng)
    }
}

impl SimulationSummary {
    pub fn new(madness: MadnessLevel) -> Self {
        SimulationSummary {
            madness: madness.get(),
            ..Default::default()
        }
    }

    /// Count one bracket.
    pub fn record(&mut self, bracket: &BracketResult) {
        let champ = &bracket.national_champion;
        self.simulations += 1;
        *self.champion_seeds.entry(champ.seed).or_insert(0) += 1;
        *self.champion_regions.entry(champ.region.clone()).or_insert(0) += 1;
        for entry in [&bracket.final_four.left, &bracket.final_four.right] {
            *self.final_four_seeds.entry(entry.seed).or_insert(0) += 1;
        }
    }

    /// Combine the counts of two partial summaries.
    pub fn merge(mut self, other: SimulationSummary) -> SimulationSummary {
        self.simulations += other.simulations;
        for (seed, count) in other.champion_seeds {
            *self.champion_seeds.entry(seed).or_insert(0) += count;
        }
        for (region, count) in other.champion_regions {
            *self.champion_regions.entry(region).or_insert(0) += count;
        }
        for (seed, count) in other.final_four_seeds {
            *self.final_four_seeds.entry(seed).or_insert(0) += count;
        }
        self
    }

    /// Recompute `mean_champion_seed` from the champion counts.
    pub fn finish(&mut self) {
        let seed_total: usize = self
            .champion_seeds
            .iter()
            .map(|(seed, count)| usize::from(seed.get()) * count)
            .sum();
        self.mean_champion_seed = if self.simulations == 0 {
            0.0
        } else {
            seed_total as f64 / self.simulations as f64
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REGION_NAMES;

    #[test]
    fn test_simulate_bracket_seeded() {
        let sim = BracketSimulator::new(OverridesMap::historical(), Some(42));

        // With same seed, should get same result
        let b1 = sim.simulate_bracket(MadnessLevel::default());
        let b2 = sim.simulate_bracket(MadnessLevel::default());
        assert_eq!(b1, b2);

        let r1 = sim.simulate_region("Top Left", MadnessLevel::default());
        assert_eq!(r1, b1.top_left);
    }

    #[test]
    fn test_run_simulations_counts() {
        let sim = BracketSimulator::new(OverridesMap::historical(), Some(7));
        let summary = sim.run_simulations(500, MadnessLevel::default());

        assert_eq!(summary.simulations, 500);
        assert_eq!(summary.madness, 5);
        assert_eq!(summary.champion_seeds.values().sum::<usize>(), 500);
        assert_eq!(summary.champion_regions.values().sum::<usize>(), 500);
        assert_eq!(summary.final_four_seeds.values().sum::<usize>(), 1000);
        assert!(summary
            .champion_regions
            .keys()
            .all(|r| REGION_NAMES.contains(&r.as_str())));
        assert!(summary.mean_champion_seed >= 1.0 && summary.mean_champion_seed <= 16.0);
    }

    #[test]
    fn test_run_simulations_deterministic() {
        let sim = BracketSimulator::new(OverridesMap::historical(), Some(2025));
        let s1 = sim.run_simulations(200, MadnessLevel::new(7).unwrap());
        let s2 = sim.run_simulations(200, MadnessLevel::new(7).unwrap());
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_chalk_favors_top_seeds() {
        let sim = BracketSimulator::new(OverridesMap::historical(), Some(11));
        let chalk = sim.run_simulations(2000, MadnessLevel::new(0).unwrap());
        let chaos = sim.run_simulations(2000, MadnessLevel::max());

        assert!(chalk.mean_champion_seed < chaos.mean_champion_seed);
        // Uniform champion seeds average 8.5
        assert!((chaos.mean_champion_seed - 8.5).abs() < 0.5);
    }

    #[test]
    fn test_parallel_summary_matches_sequential() {
        let sim = BracketSimulator::new(OverridesMap::historical(), Some(99));
        let madness = MadnessLevel::new(6).unwrap();
        let parallel = sim.run_simulations(300, madness);

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut sequential = SimulationSummary::new(madness);
        for _ in 0..300 {
            let sim_seed = rng.gen::<u64>();
            sequential.record(&sim.simulate_seeded(sim_seed, madness));
        }
        sequential.finish();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_merge_adds_counts() {
        let sim = BracketSimulator::new(OverridesMap::historical(), Some(3));
        let madness = MadnessLevel::default();
        let bracket = sim.simulate_bracket(madness);

        let mut a = SimulationSummary::new(madness);
        a.record(&bracket);
        let mut b = SimulationSummary::new(madness);
        b.record(&bracket);
        b.record(&bracket);

        let mut merged = a.merge(b);
        merged.finish();
        assert_eq!(merged.simulations, 3);
        assert_eq!(merged.champion_seeds[&bracket.national_champion.seed], 3);
        assert_eq!(merged.final_four_seeds.values().sum::<usize>(), 6);
        assert_eq!(
            merged.mean_champion_seed,
            f64::from(bracket.national_champion.seed.get())
        );
    }

    #[test]
    fn test_empty_batch() {
        let sim = BracketSimulator::default();
        let summary = sim.run_simulations(0, MadnessLevel::default());
        assert_eq!(summary.simulations, 0);
        assert!(summary.champion_seeds.is_empty());
        assert_eq!(summary.mean_champion_seed, 0.0);
    }
}
