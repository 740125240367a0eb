use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::events::{MatchEvent, ShotType};
use super::player::{Personality, PlayerId};
use super::team::{Side, TeamInfo};

/// Telemetry counters. Observational only; never read by the probability models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TeamMatchStats {
    pub possession_minutes: u32,
    pub territorial_minutes: u32,
    pub shots: u32,
    pub passes_won: u32,
    pub tackles_won: u32,
}

impl TeamMatchStats {
    /// Weighted action count used by the dominance composite.
    pub fn actions(&self, shot_weight: f32) -> f32 {
        self.passes_won as f32 + self.tackles_won as f32 + self.shots as f32 * shot_weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct MatchStatistics {
    pub home: TeamMatchStats,
    pub away: TeamMatchStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GoalRecord {
    pub minute: u8,
    pub side: Side,
    pub player_id: PlayerId,
    pub player_name: String,
    pub shot: ShotType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShootoutKick {
    pub kick_index: u8,
    pub side: Side,
    pub taker_id: PlayerId,
    pub taker_name: String,
    pub scored: bool,
}

/// Penalty shootout outcome (does not mutate regulation score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShootoutResult {
    pub home_goals: u8,
    pub away_goals: u8,
    pub kicks_taken_home: u8,
    pub kicks_taken_away: u8,
    pub winner: Side,
    /// Set only when the sudden-death cap was hit and the winner was drawn by
    /// lot. The two tallies are then equal.
    #[serde(default)]
    pub decided_by_lot: bool,
    #[serde(default)]
    pub kicks: Vec<ShootoutKick>,
}

/// One player's morale change, computed after the final whistle.
///
/// Computing an update never applies it; see
/// [`crate::engine::morale::MoraleStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MoraleUpdate {
    pub player_id: PlayerId,
    pub player_name: String,
    pub side: Side,
    pub personality: Personality,
    pub started: bool,
    pub old_morale: u8,
    pub new_morale: u8,
    pub delta: i32,
    pub outcome_change: f32,
    pub performance_change: f32,
    pub drift_change: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchResult {
    pub home: TeamInfo,
    pub away: TeamInfo,
    pub score_home: u8,
    pub score_away: u8,
    pub knockout: bool,
    /// Seed of the run's random stream; replaying it reproduces the match.
    pub seed: u64,
    /// True when either side could not field eleven; the score stays 0-0.
    #[serde(default)]
    pub abandoned: bool,
    pub events: Vec<MatchEvent>,
    #[serde(default)]
    pub goals: Vec<GoalRecord>,
    #[serde(default)]
    pub statistics: MatchStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<ShootoutResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morale_updates: Option<Vec<MoraleUpdate>>,
}

impl MatchResult {
    /// Winning side, including shootout decisions. `None` for a draw.
    pub fn winner(&self) -> Option<Side> {
        if let Some(shootout) = &self.shootout {
            return Some(shootout.winner);
        }
        match self.score_home.cmp(&self.score_away) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn team(&self, side: Side) -> &TeamInfo {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn winner_on_penalties(&self) -> Option<&str> {
        self.shootout.as_ref().map(|s| self.team(s.winner).name.as_str())
    }

    pub fn goals_for(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.score_home,
            Side::Away => self.score_away,
        }
    }
}
