//! Effective Rating Modifiers
//!
//! Both layers are off by default and can be switched on independently.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SpecialistBonusConfig {
    pub enabled: bool,
    /// Raw specialty attribute at which the bonus starts (기본: 65)
    pub threshold: u8,
    /// Multiplier on the effective specialty rating (기본: 1.15)
    pub factor: f32,
}

impl Default for SpecialistBonusConfig {
    fn default() -> Self {
        Self { enabled: false, threshold: 65, factor: 1.15 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MoraleEffectConfig {
    pub enabled: bool,
    /// Fraction of effective skill lost at morale 0 (기본: 0.10)
    pub max_penalty: f32,
}

impl Default for MoraleEffectConfig {
    fn default() -> Self {
        Self { enabled: false, max_penalty: 0.10 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RatingConfig {
    pub specialist_bonus: SpecialistBonusConfig,
    pub morale_effect: MoraleEffectConfig,
}
