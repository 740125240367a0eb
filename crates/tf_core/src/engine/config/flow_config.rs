//! Match Flow Configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Zone-transition and clock parameters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FlowConfig {
    // === Home Advantage ===
    /// 홈 어드밴티지 배율, applied to every zone of the home side (기본: 1.04)
    pub home_advantage: f32,

    // === Logistic Scales ===
    /// Midfield contest scale (기본: 32)
    pub midfield_scaling: f32,
    /// Attack vs defensive gate scale (기본: 32)
    pub attack_scaling: f32,
    /// Goalkeeper share of the defensive gate (기본: 0.18)
    pub goalkeeper_gate_weight: f32,

    // === Penalties ===
    /// Chance that a failed attack becomes a penalty (기본: 0.03)
    pub penalty_award_probability: f32,

    // === Clock ===
    /// Smallest clock step in minutes (기본: 1)
    pub clock_step_min: u8,
    /// Largest clock step in minutes (기본: 6)
    pub clock_step_max: u8,
    pub halftime_minute: u8,
    pub full_time_minute: u8,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            home_advantage: 1.04,

            midfield_scaling: 32.0,
            attack_scaling: 32.0,
            goalkeeper_gate_weight: 0.18,

            penalty_award_probability: 0.03,

            clock_step_min: 1,
            clock_step_max: 6,
            halftime_minute: 45,
            full_time_minute: 90,
        }
    }
}
