use statrs::distribution::{ContinuousCDF, Normal};

use crate::constants::{MAX_CHALK_PROB, MIN_CHALK_PROB, SEED_GAP_STDDEV};
use crate::overrides::OverridesMap;
use crate::seed::{MadnessLevel, Matchup, Seed};

/// Probability that the better seed wins at madness 0.
///
/// Uses the override for this matchup when one exists, otherwise a normal
/// CDF of the seed gap measured in [`SEED_GAP_STDDEV`] units, clamped to
/// `[MIN_CHALK_PROB, MAX_CHALK_PROB]`.
pub fn chalk_prob(matchup: &Matchup, overrides: Option<&OverridesMap>) -> f64 {
    if let Some(ovr) = overrides {
        if let Some(prob) = ovr.get(matchup.better(), matchup.worse()) {
            return prob;
        }
    }

    let z = f64::from(matchup.gap()) / SEED_GAP_STDDEV;
    Normal::standard()
        .cdf(z)
        .clamp(MIN_CHALK_PROB, MAX_CHALK_PROB)
}

/// Calculate the probability of seed_a beating seed_b.
///
/// The better seed's chalk probability is pulled linearly toward 0.5 by the
/// chaos fraction of `madness`:
///
/// `p_better = 0.5 + (chalk - 0.5) * (1 - madness / 10)`
///
/// At madness 10 every game is exactly 50/50.
///
/// # Arguments
/// * `seed_a` - Seed whose win probability is returned
/// * `seed_b` - Opponent seed
/// * `madness` - Chaos level
/// * `overrides` - Optional fixed chalk probabilities (see [`OverridesMap::historical`])
///
/// # Returns
/// Probability of seed_a winning, strictly inside (0, 1)
///
/// # Panics
/// If `seed_a == seed_b`; a seed never meets itself inside a region.
pub fn calculate_win_prob(
    seed_a: Seed,
    seed_b: Seed,
    madness: MadnessLevel,
    overrides: Option<&OverridesMap>,
) -> f64 {
    assert_ne!(seed_a, seed_b, "a seed cannot play itself");
    let matchup = Matchup::ordered(seed_a, seed_b);

    let chalk = chalk_prob(&matchup, overrides);
    let p_better = 0.5 + (chalk - 0.5) * (1.0 - madness.chaos());

    if seed_a == matchup.better() {
        p_better
    } else {
        1.0 - p_better
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_SEED, MIN_SEED};
    use proptest::prelude::*;

    fn seed(n: i64) -> Seed {
        Seed::new(n).unwrap()
    }

    fn madness(n: i64) -> MadnessLevel {
        MadnessLevel::new(n).unwrap()
    }

    fn all_pairs() -> impl Iterator<Item = (Seed, Seed)> {
        (MIN_SEED..=MAX_SEED).flat_map(|a| {
            (MIN_SEED..=MAX_SEED)
                .filter(move |&b| b != a)
                .map(move |b| (seed(a as i64), seed(b as i64)))
        })
    }

    #[test]
    fn test_historical_rates_at_chalk() {
        let hist = OverridesMap::historical();
        let p = calculate_win_prob(seed(1), seed(16), madness(0), Some(&hist));
        assert!((p - 0.993).abs() < 1e-12);
        let p = calculate_win_prob(seed(15), seed(2), madness(0), Some(&hist));
        assert!((p - 0.062).abs() < 1e-12);
    }

    #[test]
    fn test_historical_rates_interpolate() {
        let hist = OverridesMap::historical();
        let p = calculate_win_prob(seed(1), seed(16), madness(5), Some(&hist));
        assert!((p - (0.5 + 0.493 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_max_madness_is_coin_flip() {
        let hist = OverridesMap::historical();
        for (a, b) in all_pairs() {
            let p = calculate_win_prob(a, b, MadnessLevel::max(), Some(&hist));
            assert!((p - 0.5).abs() < 1e-12, "{} vs {} gave {}", a, b, p);
        }
    }

    #[test]
    fn test_probability_bounds() {
        let hist = OverridesMap::historical();
        for m in MadnessLevel::all() {
            for (a, b) in all_pairs() {
                let p = calculate_win_prob(a, b, m, Some(&hist));
                assert!(p > 0.0 && p < 1.0, "Probability must be in (0, 1)");
                let plain = calculate_win_prob(a, b, m, None);
                assert!(plain > 0.0 && plain < 1.0);
            }
        }
    }

    #[test]
    fn test_symmetric() {
        let hist = OverridesMap::historical();
        for m in MadnessLevel::all() {
            for (a, b) in all_pairs() {
                let p1 = calculate_win_prob(a, b, m, Some(&hist));
                let p2 = calculate_win_prob(b, a, m, Some(&hist));
                assert!(
                    (p1 + p2 - 1.0).abs() < 1e-10,
                    "P(A beats B) + P(B beats A) should equal 1"
                );
            }
        }
    }

    #[test]
    fn test_monotone_in_gap() {
        let hist = OverridesMap::historical();
        for m in MadnessLevel::all() {
            for better in MIN_SEED..MAX_SEED {
                let mut prev = 0.5;
                for worse in (better + 1)..=MAX_SEED {
                    let (b, w) = (seed(better as i64), seed(worse as i64));
                    let p = calculate_win_prob(b, w, m, Some(&hist));
                    assert!(
                        p >= prev,
                        "{} vs {} at madness {}: {} < {}",
                        better,
                        worse,
                        m,
                        p,
                        prev
                    );
                    prev = p;
                }
            }
        }
    }

    #[test]
    fn test_monotone_toward_half_in_madness() {
        let hist = OverridesMap::historical();
        for (a, b) in all_pairs().filter(|(a, b)| a < b) {
            let mut prev = 1.0;
            for m in MadnessLevel::all() {
                let p = calculate_win_prob(a, b, m, Some(&hist));
                assert!(p >= 0.5 && p <= prev);
                prev = p;
            }
        }
    }

    #[test]
    fn test_better_seed_favored() {
        let p = calculate_win_prob(seed(3), seed(14), madness(0), None);
        assert!(p > 0.8, "3 seed should be heavily favored, got {}", p);
        assert!(p < 1.0);
    }

    #[test]
    fn test_override_used() {
        let mut overrides = OverridesMap::new();
        overrides.add_override(seed(8), seed(9), 0.75).unwrap();

        let prob = calculate_win_prob(seed(8), seed(9), madness(0), Some(&overrides));
        assert!((prob - 0.75).abs() < 1e-10, "Override should be used");
    }

    #[test]
    fn test_chalk_prob_ignores_argument_order() {
        let hist = OverridesMap::historical();
        let forward = Matchup::new(seed(1), seed(16)).unwrap();
        let reverse = Matchup::new(seed(16), seed(1)).unwrap();
        assert_eq!(reverse.better(), seed(1));
        assert_eq!(chalk_prob(&reverse, Some(&hist)), chalk_prob(&forward, Some(&hist)));
        assert!((chalk_prob(&reverse, Some(&hist)) - 0.993).abs() < 1e-12);

        let general = Matchup::new(seed(14), seed(3)).unwrap();
        let p = chalk_prob(&general, None);
        assert!(p > 0.5 && p < 1.0);
    }

    #[test]
    fn test_chalk_prob_needs_distinct_seeds() {
        // The only public way to build a matchup rejects a seed playing itself
        assert!(Matchup::new(seed(4), seed(4)).is_err());
    }

    #[test]
    #[should_panic]
    fn test_equal_seeds_panic() {
        calculate_win_prob(seed(4), seed(4), madness(3), None);
    }

    proptest! {
        #[test]
        fn prop_symmetry_and_bounds(a in 1i64..=16, b in 1i64..=16, m in 0i64..=10) {
            prop_assume!(a != b);
            let hist = OverridesMap::historical();
            let p_ab = calculate_win_prob(seed(a), seed(b), madness(m), Some(&hist));
            let p_ba = calculate_win_prob(seed(b), seed(a), madness(m), Some(&hist));
            prop_assert!(p_ab > 0.0 && p_ab < 1.0);
            prop_assert!((p_ab + p_ba - 1.0).abs() < 1e-10);
        }

        #[test]
        fn prop_more_madness_never_helps_favorite(a in 1i64..=16, b in 1i64..=16, m in 0i64..10) {
            prop_assume!(a < b);
            let lo = calculate_win_prob(seed(a), seed(b), madness(m), None);
            let hi = calculate_win_prob(seed(a), seed(b), madness(m + 1), None);
            prop_assert!(hi <= lo);
            prop_assert!(hi >= 0.5);
        }
    }
}
