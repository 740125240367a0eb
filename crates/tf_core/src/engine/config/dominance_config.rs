//! Dominance Telemetry Configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DominanceConfig {
    pub possession_weight: f32,
    pub territory_weight: f32,
    pub action_weight: f32,
    /// A shot counts as this many passes/tackles (기본: 3)
    pub shot_action_weight: f32,
    /// Exponential smoothing rate per tick (기본: 0.1)
    pub momentum: f32,
}

impl Default for DominanceConfig {
    fn default() -> Self {
        Self {
            possession_weight: 0.3,
            territory_weight: 0.3,
            action_weight: 0.4,
            shot_action_weight: 3.0,
            momentum: 0.1,
        }
    }
}
