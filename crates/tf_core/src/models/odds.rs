use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::player::{Personality, PlayerId, Position};
use super::team::Side;
use crate::engine::lineup::TeamAverages;
use crate::engine::zonal::ZonalStrength;

/// Outcome frequencies from the user side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct OutcomeOdds {
    /// Runs that actually completed (may be below the request under a time budget).
    pub runs: u32,
    pub win_pct: f32,
    pub draw_pct: f32,
    pub loss_pct: f32,
    pub avg_goals_for: f32,
    pub avg_goals_against: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LineupEntry {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub skill: u8,
    pub shape: u8,
    pub effective_skill: f32,
    pub morale: u8,
    pub personality: Personality,
    pub free_kick_ability: u8,
    pub penalty_taking: u8,
}

/// Descriptive pre-match view of one side in one orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamSnapshot {
    pub name: String,
    pub color: String,
    pub side: Side,
    pub averages: TeamAverages,
    /// Zonal strength before the home boost.
    pub base_strength: ZonalStrength,
    pub strength: ZonalStrength,
    pub lineup: Vec<LineupEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FixtureOdds {
    pub user_side: Side,
    pub outcome: OutcomeOdds,
    pub user: TeamSnapshot,
    pub enemy: TeamSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OddsSummary {
    pub runs_requested: u32,
    /// User at home, enemy away.
    pub home_fixture: FixtureOdds,
    /// Enemy at home, user away.
    pub away_fixture: FixtureOdds,
}
