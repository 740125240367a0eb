//! Per-match wrapper around a roster.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::config::EngineConfig;
use crate::engine::lineup::{Lineup, LineupSelector, TeamAverages};
use crate::engine::ratings::RatingModel;
use crate::engine::zonal::ZonalStrength;
use crate::models::{LineupEntry, Player, PlayerId, Position, Roster, Side, TeamMatchStats, TeamSnapshot};

#[derive(Debug)]
pub(crate) struct MatchTeam<'a> {
    pub roster: &'a Roster,
    pub side: Side,
    pub lineup: Lineup<'a>,
    pub base_strength: ZonalStrength,
    pub strength: ZonalStrength,
    pub averages: TeamAverages,
    pub free_kick_taker: Option<&'a Player>,
    pub penalty_taker: Option<&'a Player>,
    pub score: u8,
    pub goals: HashMap<PlayerId, u8>,
    pub stats: TeamMatchStats,
}

impl<'a> MatchTeam<'a> {
    /// `boost` is the home-advantage factor, or 1.0 when not boosted.
    pub fn new(
        roster: &'a Roster,
        side: Side,
        fixed_lineup: Option<&[PlayerId]>,
        boost: f32,
        config: &EngineConfig,
        ratings: &RatingModel,
    ) -> Self {
        let lineup = LineupSelector::new(config.lineup.formation, ratings).select(roster, fixed_lineup);
        let base_strength =
            ZonalStrength::from_lineup(&lineup, ratings, config.lineup.empty_zone_strength);
        let strength = base_strength.scaled(boost);
        let averages = lineup.averages(ratings);
        let free_kick_taker = best_by(lineup.starters(), |p| p.free_kick_ability);
        let penalty_taker = best_by(lineup.starters(), |p| p.penalty_taking);

        Self {
            roster,
            side,
            lineup,
            base_strength,
            strength,
            averages,
            free_kick_taker,
            penalty_taker,
            score: 0,
            goals: HashMap::new(),
            stats: TeamMatchStats::default(),
        }
    }

    /// Uniform pick among forwards and midfielders.
    pub fn random_shooter<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a Player> {
        let candidates: Vec<&'a Player> = self
            .lineup
            .by_position(Position::Forward)
            .iter()
            .chain(self.lineup.by_position(Position::Midfielder))
            .copied()
            .collect();
        candidates.choose(rng).copied()
    }

    pub fn record_goal(&mut self, scorer: PlayerId) {
        self.score = self.score.saturating_add(1);
        *self.goals.entry(scorer).or_insert(0) += 1;
    }

    pub fn goals_by(&self, id: PlayerId) -> u8 {
        self.goals.get(&id).copied().unwrap_or(0)
    }

    pub fn snapshot(&self, ratings: &RatingModel) -> TeamSnapshot {
        TeamSnapshot {
            name: self.roster.name.clone(),
            color: self.roster.color.clone(),
            side: self.side,
            averages: self.averages,
            base_strength: self.base_strength,
            strength: self.strength,
            lineup: self
                .lineup
                .starters()
                .map(|p| LineupEntry {
                    id: p.id,
                    name: p.name.clone(),
                    position: p.position,
                    skill: p.skill,
                    shape: p.shape,
                    effective_skill: ratings.skill(p),
                    morale: p.morale,
                    personality: p.personality,
                    free_kick_ability: p.free_kick_ability,
                    penalty_taking: p.penalty_taking,
                })
                .collect(),
        }
    }
}

/// First player with the highest key, in lineup order.
fn best_by<'a>(players: impl Iterator<Item = &'a Player>, key: impl Fn(&Player) -> u8) -> Option<&'a Player> {
    let mut best: Option<&'a Player> = None;
    for p in players {
        if best.map_or(true, |b| key(p) > key(b)) {
            best = Some(p);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster() -> Roster {
        let mut players = vec![Player::new(1, "GK", Position::Goalkeeper, 60, 100).with_free_kick(90)];
        for i in 0..4 {
            players.push(Player::new(10 + i, format!("D{i}"), Position::Defender, 60, 100));
        }
        for i in 0..4 {
            players.push(
                Player::new(20 + i, format!("M{i}"), Position::Midfielder, 60, 100)
                    .with_free_kick(70)
                    .with_penalties(60 + i as u8 * 5, 50),
            );
        }
        for i in 0..2 {
            players.push(Player::new(30 + i, format!("F{i}"), Position::Forward, 60, 100).with_penalties(75, 50));
        }
        Roster::new("Takers", players)
    }

    #[test]
    fn test_designated_takers_use_raw_attributes() {
        let roster = roster();
        let config = EngineConfig::default();
        let ratings = RatingModel::base();
        let team = MatchTeam::new(&roster, Side::Home, None, 1.0, &config, &ratings);
        // the keeper may take free kicks
        assert_eq!(team.free_kick_taker.map(|p| p.id), Some(PlayerId(1)));
        // M3 and both forwards share 75; M3 comes first in lineup order
        assert_eq!(team.penalty_taker.map(|p| p.id), Some(PlayerId(23)));
    }

    #[test]
    fn test_home_boost_keeps_base_strength() {
        let roster = roster();
        let config = EngineConfig::default();
        let ratings = RatingModel::base();
        let team = MatchTeam::new(&roster, Side::Home, None, 1.04, &config, &ratings);
        assert!((team.base_strength.midfield - 60.0).abs() < 1e-4);
        assert!((team.strength.midfield - 62.4).abs() < 1e-3);
    }

    #[test]
    fn test_shooter_never_defender_or_keeper() {
        let roster = roster();
        let config = EngineConfig::default();
        let ratings = RatingModel::base();
        let team = MatchTeam::new(&roster, Side::Away, None, 1.0, &config, &ratings);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let shooter = team.random_shooter(&mut rng).unwrap();
            assert!(matches!(shooter.position, Position::Forward | Position::Midfielder));
        }
    }

    #[test]
    fn test_goal_tally() {
        let roster = roster();
        let config = EngineConfig::default();
        let ratings = RatingModel::base();
        let mut team = MatchTeam::new(&roster, Side::Home, None, 1.0, &config, &ratings);
        team.record_goal(PlayerId(30));
        team.record_goal(PlayerId(30));
        assert_eq!(team.score, 2);
        assert_eq!(team.goals_by(PlayerId(30)), 2);
        assert_eq!(team.goals_by(PlayerId(31)), 0);
    }
}
