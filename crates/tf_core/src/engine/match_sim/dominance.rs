//! Dominance telemetry.
//!
//! A smoothed composite of possession share, territorial share and weighted
//! action share. Positive values favour the home side. Purely observational:
//! nothing in the simulation reads it back.

use crate::engine::config::DominanceConfig;
use crate::models::TeamMatchStats;

/// Unsmoothed composite for the current counters, or `None` before any
/// possession time has been recorded.
pub fn dominance_target(home: &TeamMatchStats, away: &TeamMatchStats, cfg: &DominanceConfig) -> Option<f32> {
    let total_time = (home.possession_minutes + away.possession_minutes) as f32;
    if total_time <= 0.0 {
        return None;
    }

    let possession = (home.possession_minutes as f32 - away.possession_minutes as f32) / total_time;
    let territory = (home.territorial_minutes as f32 - away.territorial_minutes as f32) / total_time;

    let home_actions = home.actions(cfg.shot_action_weight);
    let away_actions = away.actions(cfg.shot_action_weight);
    let total_actions = home_actions + away_actions;
    let actions = if total_actions > 0.0 { (home_actions - away_actions) / total_actions } else { 0.0 };

    Some(
        possession * cfg.possession_weight
            + territory * cfg.territory_weight
            + actions * cfg.action_weight,
    )
}

/// One smoothing step toward `target`, clamped to [-1, 1].
pub fn smooth(current: f32, target: f32, momentum: f32) -> f32 {
    (current + (target - current) * momentum).clamp(-1.0, 1.0)
}
