#![deny(warnings)]

//! Rate math: OPS and the randomized at-bat resolver.
//!
//! This crate provides validated pure helpers for:
//! - On-base and slugging percentages with division-by-zero guards
//! - The per-plate-appearance outcome probability table
//! - Resolving one at-bat against an injected random source

use rand::Rng;
use sim_core::{AtBatOutcome, BattingLine};

/// Fixed probability of a hit-by-pitch per plate appearance.
pub const HIT_BY_PITCH_RATE: f64 = 0.02;
/// Fixed probability of a sacrifice fly per plate appearance.
pub const SACRIFICE_FLY_RATE: f64 = 0.05;
/// Ceiling on the OPS-scaled walk rate.
pub const WALK_RATE_CAP: f64 = 0.15;
/// Ceiling on the OPS-scaled base-hit rate.
pub const BASE_HIT_RATE_CAP: f64 = 0.40;

/// Hit-type split, cumulative over a uniform draw: 70% single, 15% double,
/// 10% triple, 5% home run.
pub const SINGLE_THRESHOLD: f64 = 0.70;
pub const DOUBLE_THRESHOLD: f64 = 0.85;
pub const TRIPLE_THRESHOLD: f64 = 0.95;

/// On-base percentage: (hits + walks + HBP) / plate appearances.
/// Returns 0 for an empty line rather than dividing by zero.
pub fn on_base_pct(line: &BattingLine) -> f64 {
    let pa = line.plate_appearances();
    if pa == 0 {
        return 0.0;
    }
    f64::from(line.hits + line.walks + line.hit_by_pitch) / f64::from(pa)
}

/// Slugging percentage: total bases over at-bats, with hits inclusive of
/// extra-base hits (singles = hits - 2B - 3B - HR).
///
/// Returns 0 when the batter has no at-bats, so a walk-only line cannot
/// push NaN into the resolver.
pub fn slugging_pct(line: &BattingLine) -> f64 {
    if line.at_bats == 0 {
        return 0.0;
    }
    let total_bases =
        line.singles() + 2 * line.doubles + 3 * line.triples + 4 * line.home_runs;
    f64::from(total_bases) / f64::from(line.at_bats)
}

/// Composite OPS rating: on-base plus slugging.
pub fn ops(line: &BattingLine) -> f64 {
    on_base_pct(line) + slugging_pct(line)
}

/// Coarse outcome band for the first uniform draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeBand {
    Walk,
    HitByPitch,
    Hit,
    SacrificeFly,
    Out,
}

/// Per-plate-appearance outcome probabilities, partitioned in the fixed
/// order walk -> HBP -> hit -> sacrifice fly -> out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutcomeRates {
    pub walk: f64,
    pub hit_by_pitch: f64,
    pub base_hit: f64,
    pub sacrifice_fly: f64,
    pub out: f64,
}

impl OutcomeRates {
    /// Build the table from a composite OPS rating. Walk and hit rates
    /// scale with OPS but are clamped to ceilings so the bands cannot
    /// overflow probability 1; the out band takes the remainder, floored
    /// at zero.
    pub fn from_ops(ops: f64) -> Self {
        let walk = (ops * 0.10).min(WALK_RATE_CAP);
        let base_hit = (ops * 0.30).min(BASE_HIT_RATE_CAP);
        let out =
            (1.0 - walk - HIT_BY_PITCH_RATE - base_hit - SACRIFICE_FLY_RATE).max(0.0);
        Self {
            walk,
            hit_by_pitch: HIT_BY_PITCH_RATE,
            base_hit,
            sacrifice_fly: SACRIFICE_FLY_RATE,
            out,
        }
    }

    /// Classify a uniform draw in [0,1) against the cumulative bands.
    /// A draw landing in the hit band needs a second draw for the hit
    /// type; see [`classify_hit`].
    pub fn classify(&self, draw: f64) -> OutcomeBand {
        let mut cut = self.walk;
        if draw < cut {
            return OutcomeBand::Walk;
        }
        cut += self.hit_by_pitch;
        if draw < cut {
            return OutcomeBand::HitByPitch;
        }
        cut += self.base_hit;
        if draw < cut {
            return OutcomeBand::Hit;
        }
        cut += self.sacrifice_fly;
        if draw < cut {
            return OutcomeBand::SacrificeFly;
        }
        OutcomeBand::Out
    }
}

/// Split the hit band by the fixed global 70/15/10/5 ratios. Deliberately
/// ignorant of the batter's own hit-type history.
pub fn classify_hit(draw: f64) -> AtBatOutcome {
    if draw < SINGLE_THRESHOLD {
        AtBatOutcome::Single
    } else if draw < DOUBLE_THRESHOLD {
        AtBatOutcome::Double
    } else if draw < TRIPLE_THRESHOLD {
        AtBatOutcome::Triple
    } else {
        AtBatOutcome::HomeRun
    }
}

/// Resolve one plate appearance for a batter.
///
/// OPS is recomputed on every call: the line handed in grows as a season
/// progresses, so caching it would freeze the feedback loop. Randomness is
/// injected so callers control seeding and tests can be deterministic.
pub fn resolve_at_bat(line: &BattingLine, rng: &mut impl Rng) -> AtBatOutcome {
    let rates = OutcomeRates::from_ops(ops(line));
    match rates.classify(rng.gen::<f64>()) {
        OutcomeBand::Walk => AtBatOutcome::Walk,
        OutcomeBand::HitByPitch => AtBatOutcome::HitByPitch,
        OutcomeBand::Hit => classify_hit(rng.gen::<f64>()),
        OutcomeBand::SacrificeFly => AtBatOutcome::SacrificeFly,
        OutcomeBand::Out => AtBatOutcome::Out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f64 = 1e-12;

    fn line(
        at_bats: u32,
        hits: u32,
        doubles: u32,
        triples: u32,
        home_runs: u32,
        walks: u32,
    ) -> BattingLine {
        BattingLine {
            at_bats,
            hits,
            doubles,
            triples,
            home_runs,
            walks,
            hit_by_pitch: 0,
            sacrifice_flies: 0,
        }
    }

    #[test]
    fn empty_line_has_zero_ops() {
        let empty = BattingLine::default();
        assert_eq!(on_base_pct(&empty), 0.0);
        assert_eq!(slugging_pct(&empty), 0.0);
        assert_eq!(ops(&empty), 0.0);
    }

    #[test]
    fn walk_only_line_does_not_divide_by_zero() {
        let l = line(0, 0, 0, 0, 0, 12);
        assert_eq!(slugging_pct(&l), 0.0);
        assert!((on_base_pct(&l) - 1.0).abs() < EPS);
        assert!(ops(&l).is_finite());
    }

    #[test]
    fn ops_known_value() {
        // 10 AB, 3 H (1 double), 2 BB: OBP = 5/12, SLG = (2 + 4)/10.
        let l = line(10, 3, 1, 0, 0, 2);
        assert!((on_base_pct(&l) - 5.0 / 12.0).abs() < EPS);
        assert!((slugging_pct(&l) - 0.4).abs() < EPS);
        assert!((ops(&l) - (5.0 / 12.0 + 0.4)).abs() < EPS);
    }

    #[test]
    fn rates_scale_with_ops_until_capped() {
        let modest = OutcomeRates::from_ops(0.700);
        assert!((modest.walk - 0.070).abs() < EPS);
        assert!((modest.base_hit - 0.210).abs() < EPS);

        let elite = OutcomeRates::from_ops(2.5);
        assert_eq!(elite.walk, WALK_RATE_CAP);
        assert_eq!(elite.base_hit, BASE_HIT_RATE_CAP);
        // Even fully capped, the out band keeps a sizable remainder.
        assert!((elite.out - 0.38).abs() < EPS);
    }

    #[test]
    fn zero_ops_leaves_only_fixed_bands() {
        let rates = OutcomeRates::from_ops(0.0);
        assert_eq!(rates.walk, 0.0);
        assert_eq!(rates.base_hit, 0.0);
        assert_eq!(rates.classify(0.0), OutcomeBand::HitByPitch);
        assert_eq!(rates.classify(0.03), OutcomeBand::SacrificeFly);
        assert_eq!(rates.classify(0.075), OutcomeBand::Out);
        assert_eq!(rates.classify(0.999), OutcomeBand::Out);
    }

    #[test]
    fn bands_partition_in_fixed_order() {
        let rates = OutcomeRates::from_ops(1.0);
        // walk 0.10, HBP to 0.12, hits to 0.42, sac fly to 0.47, out after.
        assert_eq!(rates.classify(0.05), OutcomeBand::Walk);
        assert_eq!(rates.classify(0.11), OutcomeBand::HitByPitch);
        assert_eq!(rates.classify(0.30), OutcomeBand::Hit);
        assert_eq!(rates.classify(0.45), OutcomeBand::SacrificeFly);
        assert_eq!(rates.classify(0.60), OutcomeBand::Out);
    }

    #[test]
    fn hit_split_thresholds() {
        assert_eq!(classify_hit(0.0), AtBatOutcome::Single);
        assert_eq!(classify_hit(0.6999), AtBatOutcome::Single);
        assert_eq!(classify_hit(0.70), AtBatOutcome::Double);
        assert_eq!(classify_hit(0.85), AtBatOutcome::Triple);
        assert_eq!(classify_hit(0.95), AtBatOutcome::HomeRun);
        assert_eq!(classify_hit(0.9999), AtBatOutcome::HomeRun);
    }

    #[test]
    fn zero_ops_batter_never_walks_or_hits() {
        let empty = BattingLine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..2000 {
            let outcome = resolve_at_bat(&empty, &mut rng);
            assert!(
                matches!(
                    outcome,
                    AtBatOutcome::HitByPitch
                        | AtBatOutcome::SacrificeFly
                        | AtBatOutcome::Out
                ),
                "unexpected outcome {outcome:?} for a zero-OPS batter"
            );
        }
    }

    #[test]
    fn resolver_is_deterministic_per_seed() {
        let l = line(500, 150, 30, 5, 20, 60);
        let draw = |seed: u64| -> Vec<AtBatOutcome> {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..50).map(|_| resolve_at_bat(&l, &mut rng)).collect()
        };
        assert_eq!(draw(42), draw(42));
    }

    proptest! {
        #[test]
        fn rate_table_is_a_probability_partition(ops_val in 0.0f64..5.0) {
            let r = OutcomeRates::from_ops(ops_val);
            for rate in [r.walk, r.hit_by_pitch, r.base_hit, r.sacrifice_fly, r.out] {
                prop_assert!((0.0..=1.0).contains(&rate));
            }
            let total = r.walk + r.hit_by_pitch + r.base_hit + r.sacrifice_fly + r.out;
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        #[test]
        fn components_are_bounded_for_realistic_lines(
            ab in 1u32..700,
            singles in 0u32..200,
            doubles in 0u32..60,
            triples in 0u32..20,
            hr in 0u32..60,
            walks in 0u32..150,
        ) {
            let hits = singles + doubles + triples + hr;
            prop_assume!(hits <= ab);
            let l = line(ab, hits, doubles, triples, hr, walks);
            let obp = on_base_pct(&l);
            let slg = slugging_pct(&l);
            prop_assert!((0.0..=1.0).contains(&obp));
            prop_assert!((0.0..=4.0).contains(&slg));
            prop_assert!(ops(&l) >= 0.0);
        }
    }
}
