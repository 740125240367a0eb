//! Post-Match Morale Configuration
//!
//! Every field can be overridden from JSON; missing fields keep their defaults.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::Personality;

/// 성격별 사기 반응 배율
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PersonalityMultipliers {
    pub professional: f32,
    pub ambitious_positive: f32,
    pub ambitious_negative: f32,
    pub stoic: f32,
    pub volatile: f32,
}

impl Default for PersonalityMultipliers {
    fn default() -> Self {
        Self {
            professional: 1.0,
            ambitious_positive: 1.5,
            ambitious_negative: 0.8,
            stoic: 0.6,
            volatile: 1.8,
        }
    }
}

impl PersonalityMultipliers {
    pub fn multiplier(&self, personality: Personality, positive: bool) -> f32 {
        match personality {
            Personality::Professional => self.professional,
            Personality::Ambitious if positive => self.ambitious_positive,
            Personality::Ambitious => self.ambitious_negative,
            Personality::Stoic => self.stoic,
            Personality::Volatile => self.volatile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MoraleConfig {
    /// Compute morale updates after each detailed match (기본: false)
    pub enabled: bool,

    // === Result ===
    pub win_change: f32,
    pub loss_change: f32,
    pub draw_change: f32,
    /// Goal margin at which the multiplier kicks in (기본: 3)
    pub margin_threshold: u8,
    pub margin_multiplier: f32,

    // === Performance ===
    pub goal_bonus: f32,
    /// Goals needed for the flat hat-trick bonus (기본: 3)
    pub hat_trick_goals: u8,
    pub hat_trick_bonus: f32,

    // === Bench Drift ===
    pub drift_target: f32,
    pub drift_rate: f32,

    pub personality: PersonalityMultipliers,
}

impl Default for MoraleConfig {
    fn default() -> Self {
        Self {
            enabled: false,

            win_change: 8.0,
            loss_change: -10.0,
            draw_change: 1.0,
            margin_threshold: 3,
            margin_multiplier: 1.5,

            goal_bonus: 3.0,
            hat_trick_goals: 3,
            hat_trick_bonus: 10.0,

            drift_target: 75.0,
            drift_rate: 0.05,

            personality: PersonalityMultipliers::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let cfg: MoraleConfig = serde_json::from_str(r#"{"win_change": 12.0, "personality": {"stoic": 0.5}}"#).unwrap();
        assert!((cfg.win_change - 12.0).abs() < f32::EPSILON);
        assert!((cfg.loss_change + 10.0).abs() < f32::EPSILON);
        assert!((cfg.personality.stoic - 0.5).abs() < f32::EPSILON);
        assert!((cfg.personality.volatile - 1.8).abs() < f32::EPSILON);
        assert!(!cfg.enabled);
    }

    #[test]
    fn test_ambitious_is_asymmetric() {
        let m = PersonalityMultipliers::default();
        assert!(m.multiplier(Personality::Ambitious, true) > m.multiplier(Personality::Ambitious, false));
        assert_eq!(m.multiplier(Personality::Stoic, true), m.multiplier(Personality::Stoic, false));
    }
}
