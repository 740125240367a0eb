//! Probability calculation utilities for match simulation
//!
//! All functions are pure apart from the RNG they are handed. The match
//! engine owns the generator, so every call draws fresh values and nothing
//! is cached between calls.

use rand::Rng;

use crate::engine::config::{DistanceModel, NoiseRange};
use crate::models::ShotRoll;

/// Exponent magnitude beyond which the logistic curve is treated as saturated.
pub const LOGISTIC_EXPONENT_LIMIT: f32 = 10.0;

// ============================================================================
// Contest Probability
// ============================================================================

/// P(A beats B) = 1 / (1 + e^{-(a - b) / scale}).
///
/// Saturates to exactly 0.0 or 1.0 once the exponent passes ±10. A
/// non-positive or non-finite scale degrades to a step on the sign of the
/// difference.
#[inline]
pub fn logistic_probability(strength_a: f32, strength_b: f32, scale: f32) -> f32 {
    let diff = strength_a - strength_b;
    if diff.is_nan() {
        return 0.5;
    }
    if !(scale.is_finite() && scale > 0.0) {
        return step(diff);
    }

    let exponent = -diff / scale;
    if exponent > LOGISTIC_EXPONENT_LIMIT {
        0.0
    } else if exponent < -LOGISTIC_EXPONENT_LIMIT {
        1.0
    } else {
        1.0 / (1.0 + exponent.exp())
    }
}

fn step(diff: f32) -> f32 {
    if diff > 0.0 {
        1.0
    } else if diff < 0.0 {
        0.0
    } else {
        0.5
    }
}

// ============================================================================
// Shooter vs Keeper
// ============================================================================

/// Inputs of one shooter-versus-keeper resolution.
#[derive(Debug, Clone, Copy)]
pub struct GoalChance {
    pub shooter_rating: f32,
    pub keeper_rating: f32,
    pub scaling: f32,
    pub conversion: f32,
}

#[inline]
fn sample_noise<R: Rng + ?Sized>(rng: &mut R, range: NoiseRange) -> f32 {
    if range.max > range.min {
        rng.gen_range(range.min..=range.max)
    } else {
        range.min
    }
}

/// Goal probability after independent noise on both ratings, clamped to [0, 1].
///
/// Returns the noised ratings alongside so callers can narrate them.
pub fn goal_probability<R: Rng + ?Sized>(
    rng: &mut R,
    chance: GoalChance,
    shooter_noise: NoiseRange,
    keeper_noise: NoiseRange,
) -> (f32, f32, f32) {
    let shooter = chance.shooter_rating * sample_noise(rng, shooter_noise);
    let keeper = chance.keeper_rating * sample_noise(rng, keeper_noise);
    let base = logistic_probability(shooter, keeper, chance.scaling);
    let probability = (base * chance.conversion).clamp(0.0, 1.0);
    (probability, shooter, keeper)
}

/// Resolves a shot: noised probability plus a fresh uniform roll.
pub fn roll_shot<R: Rng + ?Sized>(
    rng: &mut R,
    chance: GoalChance,
    shooter_noise: NoiseRange,
    keeper_noise: NoiseRange,
) -> ShotRoll {
    let (probability, shooter_rating, keeper_rating) =
        goal_probability(rng, chance, shooter_noise, keeper_noise);
    let roll: f32 = rng.gen();
    ShotRoll { shooter_rating, keeper_rating, probability, roll }
}

// ============================================================================
// Shot Distance
// ============================================================================

pub fn sample_shot_distance<R: Rng + ?Sized>(rng: &mut R, model: &DistanceModel) -> f32 {
    if model.max_distance > model.min_distance {
        rng.gen_range(model.min_distance..=model.max_distance)
    } else {
        model.min_distance
    }
}

/// Multiplier on the conversion factor for a shot from `distance`.
///
/// Closer than optimal earns a capped bonus; further away loses a linear
/// amount per unit down to the floor.
pub fn distance_modifier(distance: f32, model: &DistanceModel) -> f32 {
    if distance < model.optimal_distance {
        (1.0 + (model.optimal_distance - distance) * model.close_bonus_per_unit).min(model.max_bonus)
    } else {
        (1.0 - (distance - model.optimal_distance) * model.penalty_per_unit).max(model.floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SHOOTER: NoiseRange = NoiseRange::new(0.85, 1.15);
    const KEEPER: NoiseRange = NoiseRange::new(0.92, 1.08);

    #[test]
    fn test_logistic_even_contest() {
        assert!((logistic_probability(50.0, 50.0, 32.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_logistic_saturates_without_nan() {
        assert_eq!(logistic_probability(1.0e6, 0.0, 30.0), 1.0);
        assert_eq!(logistic_probability(0.0, 1.0e6, 30.0), 0.0);
        assert_eq!(logistic_probability(f32::MAX, -f32::MAX, 30.0), 1.0);
        assert!(!logistic_probability(f32::INFINITY, f32::INFINITY, 30.0).is_nan());
    }

    #[test]
    fn test_logistic_degenerate_scale() {
        assert_eq!(logistic_probability(60.0, 50.0, 0.0), 1.0);
        assert_eq!(logistic_probability(40.0, 50.0, -3.0), 0.0);
        assert_eq!(logistic_probability(50.0, 50.0, f32::NAN), 0.5);
    }

    #[test]
    fn test_distance_modifier_shape() {
        let model = DistanceModel::default();
        assert!((distance_modifier(12.0, &model) - 1.0).abs() < 1e-6);
        assert!((distance_modifier(7.0, &model) - 1.05).abs() < 1e-5);
        // bonus capped at +10%
        assert!((distance_modifier(-50.0, &model) - 1.10).abs() < 1e-5);
        assert!((distance_modifier(22.0, &model) - 0.70).abs() < 1e-5);
        // floor at 10% of base
        assert!((distance_modifier(35.0, &model) - 0.31).abs() < 1e-5);
        assert!((distance_modifier(100.0, &model) - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_goal_probability_clamped_with_large_conversion() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let chance = GoalChance { shooter_rating: 99.0, keeper_rating: 1.0, scaling: 20.0, conversion: 1.15 };
        for _ in 0..200 {
            let (p, _, _) = goal_probability(&mut rng, chance, SHOOTER, KEEPER);
            assert!((0.0..=1.0).contains(&p), "probability out of range: {}", p);
        }
    }

    #[test]
    fn test_noise_is_drawn_per_call() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let chance = GoalChance { shooter_rating: 60.0, keeper_rating: 60.0, scaling: 30.0, conversion: 1.0 };
        let first = roll_shot(&mut rng, chance, SHOOTER, KEEPER);
        let second = roll_shot(&mut rng, chance, SHOOTER, KEEPER);
        assert_ne!(first.shooter_rating, second.shooter_rating);
        assert!(first.shooter_rating >= 60.0 * 0.85 && first.shooter_rating <= 60.0 * 1.15);
        assert!(first.keeper_rating >= 60.0 * 0.92 && first.keeper_rating <= 60.0 * 1.08);
    }

    #[test]
    fn test_shot_distance_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let model = DistanceModel::default();
        for _ in 0..500 {
            let d = sample_shot_distance(&mut rng, &model);
            assert!((5.0..=35.0).contains(&d), "distance out of range: {}", d);
        }
    }

    proptest! {
        #[test]
        fn prop_logistic_in_unit_interval(a in -500f32..500.0, b in -500f32..500.0, s in 0.5f32..100.0) {
            let p = logistic_probability(a, b, s);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn prop_logistic_symmetric(a in 0f32..100.0, b in 0f32..100.0, s in 1f32..60.0) {
            let sum = logistic_probability(a, b, s) + logistic_probability(b, a, s);
            prop_assert!((sum - 1.0).abs() < 1e-5, "sum = {}", sum);
        }

        #[test]
        fn prop_logistic_increasing_in_advantage(b in 20f32..80.0, a in 20f32..80.0, delta in 0.5f32..10.0, s in 20f32..40.0) {
            // stays inside the unsaturated band: |diff| / s < 10
            prop_assert!(logistic_probability(a + delta, b, s) > logistic_probability(a, b, s));
        }

        #[test]
        fn prop_distance_modifier_bounded(d in 0f32..60.0) {
            let m = distance_modifier(d, &DistanceModel::default());
            prop_assert!((0.10..=1.10 + 1e-6).contains(&m));
        }
    }
}
