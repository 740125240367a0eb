//! Structured match events.
//!
//! Events carry numbers and names only. Text is produced separately by
//! [`crate::narration`], so the log can be rendered in any style without
//! touching the simulation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::player::{Personality, PlayerId};
use super::team::Side;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchEvent {
    pub minute: u8,
    pub importance: Importance,
    pub kind: EventKind,
    pub metadata: EventMetadata,
}

impl MatchEvent {
    /// Stable upper-case tag, e.g. `GOAL_FK`.
    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    pub fn is_goal(&self) -> bool {
        matches!(self.kind, EventKind::Goal { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Normal,
    Info,
    Minor,
    High,
    Goal,
    Miss,
    Save,
    SetPiece,
    Final,
    System,
    Error,
}

/// Shot threat tier derived from the computed goal probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DangerTier {
    Low,
    Medium,
    High,
    Critical,
}

impl DangerTier {
    pub fn from_probability(probability: f32) -> Self {
        if probability > 0.65 {
            DangerTier::Critical
        } else if probability > 0.45 {
            DangerTier::High
        } else if probability > 0.25 {
            DangerTier::Medium
        } else {
            DangerTier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum FreeKickZone {
    Deep,
    Middle,
    Attacking,
    Dangerous,
}

impl FreeKickZone {
    pub const ALL: [FreeKickZone; 4] =
        [FreeKickZone::Deep, FreeKickZone::Middle, FreeKickZone::Attacking, FreeKickZone::Dangerous];

    pub fn label(self) -> &'static str {
        match self {
            FreeKickZone::Deep => "deep",
            FreeKickZone::Middle => "middle",
            FreeKickZone::Attacking => "attacking",
            FreeKickZone::Dangerous => "dangerous",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    OpenPlay,
    DirectFreeKick,
    Penalty,
}

/// Probability and roll of a logistic zone contest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Contest {
    pub attack: f32,
    pub defense: f32,
    pub probability: f32,
    pub roll: f32,
}

/// Shooter-versus-keeper resolution, ratings after noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShotRoll {
    pub shooter_rating: f32,
    pub keeper_rating: f32,
    pub probability: f32,
    pub roll: f32,
}

impl ShotRoll {
    pub fn is_goal(&self) -> bool {
        self.roll < self.probability
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Kickoff {
        scheduled_free_kicks: u8,
    },
    Abandoned {
        home_available: u8,
        away_available: u8,
    },
    HalfTime,
    FullTime {
        home: u8,
        away: u8,
    },
    MidfieldAdvance {
        side: Side,
        contest: Contest,
    },
    BallWon {
        side: Side,
        contest: Contest,
    },
    ShotOpportunity {
        side: Side,
        contest: Contest,
        defense_modifier: f32,
    },
    DefensiveStop {
        side: Side,
        contest: Contest,
    },
    Goal {
        side: Side,
        shot: ShotType,
        scorer_id: PlayerId,
        scorer: String,
        keeper: String,
        roll: ShotRoll,
        home: u8,
        away: u8,
    },
    ShotMissed {
        side: Side,
        shot: ShotType,
        shooter_id: PlayerId,
        shooter: String,
        keeper: String,
        roll: ShotRoll,
        saved: bool,
    },
    FreeKickAwarded {
        side: Side,
        zone: FreeKickZone,
    },
    DirectFreeKick {
        side: Side,
        taker: String,
    },
    IndirectFreeKick {
        side: Side,
    },
    FreeKickRestart {
        side: Side,
    },
    PenaltyAwarded {
        side: Side,
    },
    ShootoutStart,
    ShootoutRound {
        round: u8,
        sudden_death: bool,
    },
    ShootoutKick {
        side: Side,
        taker: String,
        keeper: String,
        roll: ShotRoll,
    },
    ShootoutScore {
        home: u8,
        away: u8,
    },
    ShootoutEnd {
        winner: Side,
        home: u8,
        away: u8,
        decided_by_lot: bool,
    },
    MoraleChange {
        side: Side,
        player_id: PlayerId,
        player: String,
        personality: Personality,
        old: u8,
        new: u8,
        delta: i32,
    },
    MoraleCommitted {
        players: u32,
    },
    MoraleCommitFailed {
        reason: String,
    },
}

impl EventKind {
    pub fn event_type(&self) -> &'static str {
        match self {
            EventKind::Kickoff { .. } => "KICKOFF",
            EventKind::Abandoned { .. } => "ABANDONED",
            EventKind::HalfTime => "HALFTIME",
            EventKind::FullTime { .. } => "FULL_TIME",
            EventKind::MidfieldAdvance { .. } => "MIDFIELD_ADVANCE",
            EventKind::BallWon { .. } => "BALL_WON",
            EventKind::ShotOpportunity { .. } => "SHOT_OPPORTUNITY",
            EventKind::DefensiveStop { .. } => "DEFENSIVE_STOP",
            EventKind::Goal { shot, .. } => match shot {
                ShotType::OpenPlay => "GOAL",
                ShotType::DirectFreeKick => "GOAL_FK",
                ShotType::Penalty => "GOAL_PENALTY",
            },
            EventKind::ShotMissed { shot, .. } => match shot {
                ShotType::OpenPlay => "MISS",
                ShotType::DirectFreeKick => "MISS_FK",
                ShotType::Penalty => "MISS_PENALTY",
            },
            EventKind::FreeKickAwarded { .. } => "FREE_KICK",
            EventKind::DirectFreeKick { .. } => "DIRECT_FK",
            EventKind::IndirectFreeKick { .. } => "INDIRECT_FK_ATTACK",
            EventKind::FreeKickRestart { .. } => "FK_RESTART",
            EventKind::PenaltyAwarded { .. } => "PENALTY_AWARDED",
            EventKind::ShootoutStart => "SHOOTOUT_START",
            EventKind::ShootoutRound { .. } => "SHOOTOUT_ROUND",
            EventKind::ShootoutKick { .. } => "SHOOTOUT_KICK",
            EventKind::ShootoutScore { .. } => "SHOOTOUT_SCORE",
            EventKind::ShootoutEnd { .. } => "SHOOTOUT_END",
            EventKind::MoraleChange { .. } => "MORALE_CHANGE",
            EventKind::MoraleCommitted { .. } => "MORALE_COMMIT",
            EventKind::MoraleCommitFailed { .. } => "MORALE_COMMIT_FAILED",
        }
    }

    pub fn importance(&self) -> Importance {
        match self {
            EventKind::Kickoff { .. } | EventKind::HalfTime => Importance::Info,
            EventKind::Abandoned { .. } => Importance::Error,
            EventKind::FullTime { .. } => Importance::Final,
            EventKind::MidfieldAdvance { .. }
            | EventKind::BallWon { .. }
            | EventKind::ShotOpportunity { .. }
            | EventKind::DefensiveStop { .. }
            | EventKind::IndirectFreeKick { .. } => Importance::Normal,
            EventKind::Goal { .. } => Importance::Goal,
            EventKind::ShotMissed { saved: true, .. } => Importance::Save,
            EventKind::ShotMissed { .. } => Importance::Miss,
            EventKind::FreeKickAwarded { .. } => Importance::SetPiece,
            EventKind::DirectFreeKick { .. } | EventKind::PenaltyAwarded { .. } => Importance::High,
            EventKind::FreeKickRestart { .. } => Importance::Minor,
            EventKind::ShootoutStart | EventKind::ShootoutEnd { .. } => Importance::Final,
            EventKind::ShootoutRound { .. } | EventKind::ShootoutScore { .. } => Importance::Info,
            EventKind::ShootoutKick { .. } => Importance::High,
            EventKind::MoraleChange { .. } | EventKind::MoraleCommitted { .. } => Importance::System,
            EventKind::MoraleCommitFailed { .. } => Importance::Error,
        }
    }
}

/// Observational data attached to every event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EventMetadata {
    /// Smoothed control scalar in [-1, 1]; positive favours the home side.
    pub dominance: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger: Option<DangerTier>,
}
