//! Set Piece Configuration (free kicks, penalties, shootouts)

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::overlay;
use crate::models::FreeKickZone;

/// Per-zone free kick profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FreeKickZoneConfig {
    /// Relative likelihood of a free kick landing in this zone
    pub likelihood: f32,
    /// Probability of a direct shot
    pub direct: f32,
    /// Probability of a cross/pass into the attacking zone
    pub indirect: f32,
    /// Multiplier on the defensive gate for the indirect attack
    pub defense_modifier: f32,
    /// Multiplier on the direct free kick conversion factor
    pub distance_factor: f32,
}

impl FreeKickZoneConfig {
    const fn new(
        likelihood: f32,
        direct: f32,
        indirect: f32,
        defense_modifier: f32,
        distance_factor: f32,
    ) -> Self {
        Self { likelihood, direct, indirect, defense_modifier, distance_factor }
    }
}

/// Zone profiles. A partial zone object overrides only the fields it names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FreeKickZones {
    #[serde(deserialize_with = "deep_zone")]
    pub deep: FreeKickZoneConfig,
    #[serde(deserialize_with = "middle_zone")]
    pub middle: FreeKickZoneConfig,
    #[serde(deserialize_with = "attacking_zone")]
    pub attacking: FreeKickZoneConfig,
    #[serde(deserialize_with = "dangerous_zone")]
    pub dangerous: FreeKickZoneConfig,
}

fn deep_zone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FreeKickZoneConfig, D::Error> {
    overlay(deserializer, FreeKickZones::default().deep)
}

fn middle_zone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FreeKickZoneConfig, D::Error> {
    overlay(deserializer, FreeKickZones::default().middle)
}

fn attacking_zone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FreeKickZoneConfig, D::Error> {
    overlay(deserializer, FreeKickZones::default().attacking)
}

fn dangerous_zone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FreeKickZoneConfig, D::Error> {
    overlay(deserializer, FreeKickZones::default().dangerous)
}

impl FreeKickZones {
    pub fn get(&self, zone: FreeKickZone) -> &FreeKickZoneConfig {
        match zone {
            FreeKickZone::Deep => &self.deep,
            FreeKickZone::Middle => &self.middle,
            FreeKickZone::Attacking => &self.attacking,
            FreeKickZone::Dangerous => &self.dangerous,
        }
    }

    /// Likelihood weights in [`FreeKickZone::ALL`] order.
    pub fn weights(&self) -> [f32; 4] {
        FreeKickZone::ALL.map(|zone| self.get(zone).likelihood)
    }
}

impl Default for FreeKickZones {
    fn default() -> Self {
        Self {
            deep: FreeKickZoneConfig::new(0.25, 0.00, 0.05, 1.00, 0.1),
            middle: FreeKickZoneConfig::new(0.50, 0.02, 0.40, 0.90, 0.3),
            attacking: FreeKickZoneConfig::new(0.17, 0.30, 0.70, 0.75, 0.8),
            dangerous: FreeKickZoneConfig::new(0.08, 0.85, 0.15, 0.60, 1.3),
        }
    }
}

/// 프리킥 스케줄 및 직접 프리킥 파라미터
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FreeKickConfig {
    // === Schedule ===
    /// Gaussian mean of the per-match count (기본: 10)
    pub count_mean: f32,
    /// Gaussian standard deviation of the count (기본: 5)
    pub count_std_dev: f32,
    /// Minimum count after truncation (기본: 10)
    pub count_floor: u8,

    // === Direct Free Kick ===
    /// Logistic scale (기본: 24)
    pub scaling: f32,
    /// Base conversion factor before the zone distance factor (기본: 0.60)
    pub conversion_base: f32,

    pub zones: FreeKickZones,
}

impl Default for FreeKickConfig {
    fn default() -> Self {
        Self {
            count_mean: 10.0,
            count_std_dev: 5.0,
            count_floor: 10,

            scaling: 24.0,
            conversion_base: 0.60,

            zones: FreeKickZones::default(),
        }
    }
}

impl FreeKickConfig {
    /// No scheduled free kicks at all.
    pub fn disabled() -> Self {
        Self { count_mean: 0.0, count_std_dev: 0.0, count_floor: 0, ..Self::default() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PenaltyConfig {
    /// Logistic scale (기본: 20)
    pub scaling: f32,
    /// Conversion factor, may exceed 1.0 (기본: 1.15)
    pub conversion: f32,
    /// Regulation shootout rounds (기본: 5)
    pub shootout_rounds: u8,
    /// Sudden-death rounds before the winner is drawn by lot (기본: 100)
    pub sudden_death_cap: u16,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self { scaling: 20.0, conversion: 1.15, shootout_rounds: 5, sudden_death_cap: 100 }
    }
}
