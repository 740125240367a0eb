//! # Engine Configuration
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! Every scale, conversion factor and multiplier the simulation reads lives
//! here and is passed into the engine explicitly. Nothing is global, so odds
//! queries with different configurations can run side by side.
//!
//! ## Presets
//! - [`EngineConfig::realistic`]: default balance, shot distance model on
//! - [`EngineConfig::classic`]: flat conversion, no distance model
//! - [`EngineConfig::open_play`]: no scheduled free kicks, softer home boost
//!
//! ## 사용법
//! ```rust
//! use tf_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert!(config.validate().is_ok());
//! let classic = EngineConfig::classic();
//! assert!(!classic.shot.distance.enabled);
//! ```

mod dominance_config;
mod flow_config;
mod morale_config;
mod rating_config;
mod set_piece_config;
mod shot_config;
mod squad_config;

pub use dominance_config::DominanceConfig;
pub use flow_config::FlowConfig;
pub use morale_config::{MoraleConfig, PersonalityMultipliers};
pub use rating_config::{MoraleEffectConfig, RatingConfig, SpecialistBonusConfig};
pub use set_piece_config::{FreeKickConfig, FreeKickZoneConfig, FreeKickZones, PenaltyConfig};
pub use shot_config::{DistanceModel, NoiseRange, ShotConfig, MAX_SHOT_DISTANCE};
pub use squad_config::{Formation, LineupConfig, OddsConfig};

use schemars::JsonSchema;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MatchError, Result};
use crate::models::FreeKickZone;

/// Deserializes a partial object on top of `base`; absent keys keep their value.
pub(crate) fn overlay<'de, D, T>(deserializer: D, base: T) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(base).map_err(D::Error::custom)?;
    let patch = serde_json::Value::deserialize(deserializer)?;
    match (merged.as_object_mut(), patch) {
        (Some(fields), serde_json::Value::Object(overrides)) => fields.extend(overrides),
        (_, other) => merged = other,
    }
    serde_json::from_value(merged).map_err(D::Error::custom)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    pub lineup: LineupConfig,
    pub flow: FlowConfig,
    pub shot: ShotConfig,
    pub free_kick: FreeKickConfig,
    pub penalty: PenaltyConfig,
    pub ratings: RatingConfig,
    pub morale: MoraleConfig,
    pub dominance: DominanceConfig,
    pub odds: OddsConfig,
}

impl EngineConfig {
    /// 현실적인 시뮬레이션 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Flat shot conversion without distance modulation.
    pub fn classic() -> Self {
        let mut cfg = Self::default();
        cfg.shot.distance.enabled = false;
        cfg
    }

    /// Open play only: free kicks disabled and a softer home boost.
    pub fn open_play() -> Self {
        let mut cfg = Self::default();
        cfg.free_kick = FreeKickConfig::disabled();
        cfg.flow.home_advantage = 1.03;
        cfg
    }

    /// Every float tuning value, by path.
    fn float_fields(&self) -> Vec<(&'static str, f32)> {
        let mut fields = vec![
            ("lineup.empty_zone_strength", self.lineup.empty_zone_strength),
            ("flow.home_advantage", self.flow.home_advantage),
            ("flow.midfield_scaling", self.flow.midfield_scaling),
            ("flow.attack_scaling", self.flow.attack_scaling),
            ("flow.goalkeeper_gate_weight", self.flow.goalkeeper_gate_weight),
            ("flow.penalty_award_probability", self.flow.penalty_award_probability),
            ("shot.scaling", self.shot.scaling),
            ("shot.conversion", self.shot.conversion),
            ("shot.shooter_noise.min", self.shot.shooter_noise.min),
            ("shot.shooter_noise.max", self.shot.shooter_noise.max),
            ("shot.keeper_noise.min", self.shot.keeper_noise.min),
            ("shot.keeper_noise.max", self.shot.keeper_noise.max),
            ("shot.save_margin", self.shot.save_margin),
            ("shot.distance.min_distance", self.shot.distance.min_distance),
            ("shot.distance.max_distance", self.shot.distance.max_distance),
            ("shot.distance.optimal_distance", self.shot.distance.optimal_distance),
            ("shot.distance.close_bonus_per_unit", self.shot.distance.close_bonus_per_unit),
            ("shot.distance.max_bonus", self.shot.distance.max_bonus),
            ("shot.distance.penalty_per_unit", self.shot.distance.penalty_per_unit),
            ("shot.distance.floor", self.shot.distance.floor),
            ("free_kick.count_mean", self.free_kick.count_mean),
            ("free_kick.count_std_dev", self.free_kick.count_std_dev),
            ("free_kick.scaling", self.free_kick.scaling),
            ("free_kick.conversion_base", self.free_kick.conversion_base),
            ("penalty.scaling", self.penalty.scaling),
            ("penalty.conversion", self.penalty.conversion),
            ("ratings.specialist_bonus.factor", self.ratings.specialist_bonus.factor),
            ("ratings.morale_effect.max_penalty", self.ratings.morale_effect.max_penalty),
            ("morale.win_change", self.morale.win_change),
            ("morale.loss_change", self.morale.loss_change),
            ("morale.draw_change", self.morale.draw_change),
            ("morale.margin_multiplier", self.morale.margin_multiplier),
            ("morale.goal_bonus", self.morale.goal_bonus),
            ("morale.hat_trick_bonus", self.morale.hat_trick_bonus),
            ("morale.drift_target", self.morale.drift_target),
            ("morale.drift_rate", self.morale.drift_rate),
            ("morale.personality.professional", self.morale.personality.professional),
            ("morale.personality.ambitious_positive", self.morale.personality.ambitious_positive),
            ("morale.personality.ambitious_negative", self.morale.personality.ambitious_negative),
            ("morale.personality.stoic", self.morale.personality.stoic),
            ("morale.personality.volatile", self.morale.personality.volatile),
            ("dominance.possession_weight", self.dominance.possession_weight),
            ("dominance.territory_weight", self.dominance.territory_weight),
            ("dominance.action_weight", self.dominance.action_weight),
            ("dominance.shot_action_weight", self.dominance.shot_action_weight),
            ("dominance.momentum", self.dominance.momentum),
        ];
        for zone in FreeKickZone::ALL {
            let z = self.free_kick.zones.get(zone);
            fields.extend([
                ("free_kick.zones.likelihood", z.likelihood),
                ("free_kick.zones.direct", z.direct),
                ("free_kick.zones.indirect", z.indirect),
                ("free_kick.zones.defense_modifier", z.defense_modifier),
                ("free_kick.zones.distance_factor", z.distance_factor),
            ]);
        }
        fields
    }

    /// Rejects values that would make a run meaningless or panic in sampling.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(MatchError::InvalidConfig(msg));

        // JSON numbers past f32::MAX deserialize to infinity
        if let Some((name, value)) = self.float_fields().into_iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }

        if self.lineup.formation.size() != 11 {
            return invalid(format!(
                "formation must field 11 players, got {}",
                self.lineup.formation.size()
            ));
        }

        let flow = &self.flow;
        if !(flow.home_advantage.is_finite() && flow.home_advantage > 0.0) {
            return invalid(format!("home_advantage must be positive, got {}", flow.home_advantage));
        }
        if flow.clock_step_min == 0 || flow.clock_step_min > flow.clock_step_max {
            return invalid(format!(
                "clock steps must satisfy 1 <= min <= max, got {}..={}",
                flow.clock_step_min, flow.clock_step_max
            ));
        }
        if flow.halftime_minute > flow.full_time_minute || flow.full_time_minute == 0 {
            return invalid(format!(
                "halftime ({}) must not exceed full time ({})",
                flow.halftime_minute, flow.full_time_minute
            ));
        }
        for (name, p) in [
            ("goalkeeper_gate_weight", flow.goalkeeper_gate_weight),
            ("penalty_award_probability", flow.penalty_award_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{name} must be within [0, 1], got {p}"));
            }
        }

        for (name, scale) in [
            ("flow.midfield_scaling", flow.midfield_scaling),
            ("flow.attack_scaling", flow.attack_scaling),
            ("shot.scaling", self.shot.scaling),
            ("free_kick.scaling", self.free_kick.scaling),
            ("penalty.scaling", self.penalty.scaling),
        ] {
            if !(scale.is_finite() && scale > 0.0) {
                return invalid(format!("{name} must be positive, got {scale}"));
            }
        }

        if !self.shot.shooter_noise.is_valid() || !self.shot.keeper_noise.is_valid() {
            return invalid("noise ranges must satisfy 0 < min <= max".to_string());
        }
        let distance = &self.shot.distance;
        if !(0.0 <= distance.min_distance
            && distance.min_distance <= distance.max_distance
            && distance.max_distance <= MAX_SHOT_DISTANCE)
        {
            return invalid(format!(
                "shot distance range must satisfy 0 <= min <= max <= {MAX_SHOT_DISTANCE}, got {}..{}",
                distance.min_distance, distance.max_distance
            ));
        }

        let weights = self.free_kick.zones.weights();
        if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) || weights.iter().sum::<f32>() <= 0.0 {
            return invalid("free kick zone likelihoods must be non-negative with a positive sum".to_string());
        }
        if !(self.free_kick.count_std_dev.is_finite() && self.free_kick.count_std_dev >= 0.0) {
            return invalid(format!(
                "free kick count std dev must be >= 0, got {}",
                self.free_kick.count_std_dev
            ));
        }

        if self.penalty.shootout_rounds == 0 {
            return invalid("shootout needs at least one regulation round".to_string());
        }
        if self.odds.max_runs == 0 {
            return invalid("odds.max_runs must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.dominance.momentum) {
            return invalid(format!("dominance momentum must be within [0, 1], got {}", self.dominance.momentum));
        }

        Ok(())
    }
}

// ========== Tests ==========
