//! Zonal strength: one number per tactical zone.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::lineup::Lineup;
use crate::engine::ratings::RatingModel;
use crate::models::Position;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ZonalStrength {
    pub goalkeeper: f32,
    pub defense: f32,
    pub midfield: f32,
    pub attack: f32,
}

impl ZonalStrength {
    /// Mean effective skill per position; `empty_zone` stands in for a zone with no players.
    pub fn from_lineup(lineup: &Lineup<'_>, ratings: &RatingModel, empty_zone: f32) -> Self {
        let zone = |position: Position| {
            let players = lineup.by_position(position);
            if players.is_empty() {
                return empty_zone;
            }
            players.iter().map(|p| ratings.skill(p)).sum::<f32>() / players.len() as f32
        };
        Self {
            goalkeeper: zone(Position::Goalkeeper),
            defense: zone(Position::Defender),
            midfield: zone(Position::Midfielder),
            attack: zone(Position::Forward),
        }
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            goalkeeper: self.goalkeeper * factor,
            defense: self.defense * factor,
            midfield: self.midfield * factor,
            attack: self.attack * factor,
        }
    }

    pub fn get(&self, position: Position) -> f32 {
        match position {
            Position::Goalkeeper => self.goalkeeper,
            Position::Defender => self.defense,
            Position::Midfielder => self.midfield,
            Position::Forward => self.attack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::Formation;
    use crate::engine::lineup::LineupSelector;
    use crate::models::{Player, Roster};

    #[test]
    fn test_zone_means_and_empty_baseline() {
        let roster = Roster::new(
            "NoStrikers",
            vec![
                Player::new(1, "GK", Position::Goalkeeper, 60, 100),
                Player::new(2, "D1", Position::Defender, 50, 100),
                Player::new(3, "D2", Position::Defender, 70, 100),
                Player::new(4, "M1", Position::Midfielder, 80, 0),
            ],
        );
        let ratings = RatingModel::base();
        let lineup = LineupSelector::new(Formation::CLASSIC, &ratings).select(&roster, None);
        let z = ZonalStrength::from_lineup(&lineup, &ratings, 20.0);

        assert!((z.goalkeeper - 60.0).abs() < 1e-4);
        assert!((z.defense - 60.0).abs() < 1e-4);
        assert!((z.midfield - 24.0).abs() < 1e-4);
        assert!((z.attack - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_home_boost_scales_every_zone() {
        let base = ZonalStrength { goalkeeper: 50.0, defense: 60.0, midfield: 70.0, attack: 80.0 };
        let boosted = base.scaled(1.04);
        for pos in Position::ALL {
            assert!((boosted.get(pos) - base.get(pos) * 1.04).abs() < 1e-4);
        }
    }
}
