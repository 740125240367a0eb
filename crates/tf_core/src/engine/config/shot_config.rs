//! Shot Resolution Configuration

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::overlay;

/// Longest sampled shot distance accepted by validation (pitch length).
pub const MAX_SHOT_DISTANCE: f32 = 105.0;

/// Inclusive multiplicative noise band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NoiseRange {
    pub min: f32,
    pub max: f32,
}

impl NoiseRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

/// Distance modulation of the open-play conversion factor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DistanceModel {
    pub enabled: bool,
    /// Sampling range for shot distance
    pub min_distance: f32,
    pub max_distance: f32,
    /// 최적 거리 - below it a small bonus, above it a linear penalty
    pub optimal_distance: f32,
    /// Bonus per unit closer than optimal (기본: 0.01)
    pub close_bonus_per_unit: f32,
    /// Cap on the close-range multiplier (기본: 1.10)
    pub max_bonus: f32,
    /// Penalty per unit beyond optimal (기본: 0.03)
    pub penalty_per_unit: f32,
    /// Floor on the long-range multiplier (기본: 0.10)
    pub floor: f32,
}

impl Default for DistanceModel {
    fn default() -> Self {
        Self {
            enabled: true,
            min_distance: 5.0,
            max_distance: 35.0,
            optimal_distance: 12.0,
            close_bonus_per_unit: 0.01,
            max_bonus: 1.10,
            penalty_per_unit: 0.03,
            floor: 0.10,
        }
    }
}

/// Open-play shooter-vs-keeper parameters. Noise bands are shared with
/// free kicks and penalties.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ShotConfig {
    /// Logistic scale (기본: 30)
    pub scaling: f32,
    /// Base conversion factor (기본: 1.0)
    pub conversion: f32,
    #[serde(deserialize_with = "shooter_noise")]
    pub shooter_noise: NoiseRange,
    #[serde(deserialize_with = "keeper_noise")]
    pub keeper_noise: NoiseRange,
    /// A miss whose roll lands within this margin of the probability is narrated as a save.
    pub save_margin: f32,
    pub distance: DistanceModel,
}

const SHOOTER_NOISE: NoiseRange = NoiseRange::new(0.85, 1.15);
const KEEPER_NOISE: NoiseRange = NoiseRange::new(0.92, 1.08);

fn shooter_noise<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NoiseRange, D::Error> {
    overlay(deserializer, SHOOTER_NOISE)
}

fn keeper_noise<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NoiseRange, D::Error> {
    overlay(deserializer, KEEPER_NOISE)
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            scaling: 30.0,
            conversion: 1.0,
            shooter_noise: SHOOTER_NOISE,
            keeper_noise: KEEPER_NOISE,
            save_margin: 0.1,
            distance: DistanceModel::default(),
        }
    }
}
