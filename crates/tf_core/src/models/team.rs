use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};

pub const DEFAULT_TEAM_COLOR: &str = "#cccccc";

fn default_color() -> String {
    DEFAULT_TEAM_COLOR.to_string()
}

/// A squad as supplied by the caller. Read-only for the duration of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Roster {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Ownership metadata; carried for identity only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u32>,
    pub players: Vec<Player>,
}

impl Roster {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self { name: name.into(), color: default_color(), owner_id: None, players }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }
}

/// Which end of the fixture a team occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn is_home(self) -> bool {
        matches!(self, Side::Home)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => f.write_str("home"),
            Side::Away => f.write_str("away"),
        }
    }
}

/// Display identity of a side, echoed back in results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TeamInfo {
    pub name: String,
    pub color: String,
}

impl From<&Roster> for TeamInfo {
    fn from(roster: &Roster) -> Self {
        Self { name: roster.name.clone(), color: roster.color.clone() }
    }
}
