//! Formation, zonal baseline and odds run limits

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Per-position quotas of the starting eleven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Formation {
    pub goalkeepers: u8,
    pub defenders: u8,
    pub midfielders: u8,
    pub forwards: u8,
}

impl Formation {
    /// 1-4-4-2
    pub const CLASSIC: Formation = Formation { goalkeepers: 1, defenders: 4, midfielders: 4, forwards: 2 };

    pub fn quota(&self, position: Position) -> usize {
        let n = match position {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        };
        n as usize
    }

    pub fn size(&self) -> usize {
        Position::ALL.iter().map(|&p| self.quota(p)).sum()
    }
}

impl Default for Formation {
    fn default() -> Self {
        Formation::CLASSIC
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LineupConfig {
    pub formation: Formation,
    /// Zonal strength used when a position has no players (기본: 20)
    pub empty_zone_strength: f32,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self { formation: Formation::CLASSIC, empty_zone_strength: 20.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OddsConfig {
    /// Runs per orientation when the caller does not ask for a number (기본: 100)
    pub default_runs: u32,
    /// Hard cap on runs per orientation (기본: 5000)
    pub max_runs: u32,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self { default_runs: 100, max_runs: 5000 }
    }
}
