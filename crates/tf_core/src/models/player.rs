use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stable player identity supplied by the surrounding application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        PlayerId(id)
    }
}

/// Tactical role. Used both for lineup slotting and zonal aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Slotting order: GK, DEF, MID, FWD.
    pub const ALL: [Position; 4] =
        [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward];

    pub fn index(self) -> usize {
        match self {
            Position::Goalkeeper => 0,
            Position::Defender => 1,
            Position::Midfielder => 2,
            Position::Forward => 3,
        }
    }

    pub fn short_code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    pub fn is_goalkeeper(self) -> bool {
        matches!(self, Position::Goalkeeper)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

/// 성격 유형 - scales how strongly a starter reacts to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    #[default]
    Professional,
    Ambitious,
    Stoic,
    Volatile,
}

impl Personality {
    pub fn label(self) -> &'static str {
        match self {
            Personality::Professional => "Professional",
            Personality::Ambitious => "Ambitious",
            Personality::Stoic => "Stoic",
            Personality::Volatile => "Volatile",
        }
    }
}

pub const DEFAULT_SPECIALTY: u8 = 50;
pub const DEFAULT_MORALE: u8 = 75;

fn default_specialty() -> u8 {
    DEFAULT_SPECIALTY
}

fn default_morale() -> u8 {
    DEFAULT_MORALE
}

/// Raw player record. Effective ratings are derived on demand by
/// [`crate::engine::ratings::RatingModel`] and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub shirt_number: u8,
    pub position: Position,
    pub skill: u8,
    /// Physical condition, 0-100.
    pub shape: u8,
    #[serde(default = "default_specialty")]
    pub free_kick_ability: u8,
    #[serde(default = "default_specialty")]
    pub penalty_taking: u8,
    #[serde(default = "default_specialty")]
    pub penalty_saving: u8,
    /// Persists across matches; only the morale commit path changes it.
    #[serde(default = "default_morale")]
    pub morale: u8,
    #[serde(default)]
    pub personality: Personality,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: Position, skill: u8, shape: u8) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            shirt_number: 0,
            position,
            skill,
            shape,
            free_kick_ability: DEFAULT_SPECIALTY,
            penalty_taking: DEFAULT_SPECIALTY,
            penalty_saving: DEFAULT_SPECIALTY,
            morale: DEFAULT_MORALE,
            personality: Personality::default(),
        }
    }

    pub fn with_shirt_number(mut self, number: u8) -> Self {
        self.shirt_number = number;
        self
    }

    pub fn with_free_kick(mut self, ability: u8) -> Self {
        self.free_kick_ability = ability;
        self
    }

    pub fn with_penalties(mut self, taking: u8, saving: u8) -> Self {
        self.penalty_taking = taking;
        self.penalty_saving = saving;
        self
    }

    pub fn with_morale(mut self, morale: u8) -> Self {
        self.morale = morale;
        self
    }

    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = personality;
        self
    }

    pub fn is_goalkeeper(&self) -> bool {
        self.position.is_goalkeeper()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_position_index_matches_slot_order() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
        }
        assert_eq!(Position::iter().count(), Position::ALL.len());
    }

    #[test]
    fn test_player_defaults_from_minimal_json() {
        let json = r#"{"id": 7, "name": "Kim", "position": "forward", "skill": 70, "shape": 90}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.id, PlayerId(7));
        assert_eq!(player.free_kick_ability, DEFAULT_SPECIALTY);
        assert_eq!(player.penalty_taking, DEFAULT_SPECIALTY);
        assert_eq!(player.penalty_saving, DEFAULT_SPECIALTY);
        assert_eq!(player.morale, DEFAULT_MORALE);
        assert_eq!(player.personality, Personality::Professional);
    }

    #[test]
    fn test_personality_serializes_snake_case() {
        for personality in Personality::iter() {
            let json = serde_json::to_string(&personality).unwrap();
            assert_eq!(json, format!("\"{}\"", personality.label().to_lowercase()));
        }
    }
}
