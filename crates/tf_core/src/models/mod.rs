pub mod events;
pub mod match_result;
pub mod odds;
pub mod player;
pub mod team;

pub use events::{
    Contest, DangerTier, EventKind, EventMetadata, FreeKickZone, Importance, MatchEvent, ShotRoll,
    ShotType,
};
pub use match_result::{
    GoalRecord, MatchResult, MatchStatistics, MoraleUpdate, ShootoutKick, ShootoutResult,
    TeamMatchStats,
};
pub use odds::{FixtureOdds, LineupEntry, OddsSummary, OutcomeOdds, TeamSnapshot};
pub use player::{Personality, Player, PlayerId, Position};
pub use team::{Roster, Side, TeamInfo, DEFAULT_TEAM_COLOR};
