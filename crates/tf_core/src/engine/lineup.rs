//! Starting eleven selection.
//!
//! Two paths: a frozen list of player ids (used by tactics screens that
//! compare odds across repeated queries), or greedy selection by effective
//! skill under the formation quotas.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::config::Formation;
use crate::engine::ratings::RatingModel;
use crate::models::{Player, PlayerId, Position, Roster};

/// Selected players grouped by position, in selection order.
#[derive(Debug, Clone, Default)]
pub struct Lineup<'a> {
    groups: [Vec<&'a Player>; 4],
}

impl<'a> Lineup<'a> {
    fn push(&mut self, player: &'a Player) {
        self.groups[player.position.index()].push(player);
    }

    pub fn by_position(&self, position: Position) -> &[&'a Player] {
        &self.groups[position.index()]
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// GK, DEF, MID, FWD order.
    pub fn starters(&self) -> impl Iterator<Item = &'a Player> + '_ {
        self.groups.iter().flat_map(|g| g.iter().copied())
    }

    pub fn outfield(&self) -> impl Iterator<Item = &'a Player> + '_ {
        self.starters().filter(|p| !p.is_goalkeeper())
    }

    pub fn goalkeeper(&self) -> Option<&'a Player> {
        self.groups[Position::Goalkeeper.index()].first().copied()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.starters().any(|p| p.id == id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.starters().map(|p| p.id).collect()
    }

    pub fn averages(&self, ratings: &RatingModel) -> TeamAverages {
        TeamAverages::from_players(self.starters(), ratings)
    }
}

/// Means over the selected eleven, kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TeamAverages {
    pub base_skill: f32,
    pub shape: f32,
    pub effective_skill: f32,
    pub morale: f32,
}

impl TeamAverages {
    pub fn from_players<'p>(players: impl Iterator<Item = &'p Player>, ratings: &RatingModel) -> Self {
        let mut totals = TeamAverages::default();
        let mut n = 0usize;
        for p in players {
            totals.base_skill += p.skill as f32;
            totals.shape += p.shape as f32;
            totals.effective_skill += ratings.skill(p);
            totals.morale += p.morale as f32;
            n += 1;
        }
        if n == 0 {
            return totals;
        }
        let n = n as f32;
        TeamAverages {
            base_skill: totals.base_skill / n,
            shape: totals.shape / n,
            effective_skill: totals.effective_skill / n,
            morale: totals.morale / n,
        }
    }
}

pub struct LineupSelector<'c> {
    formation: Formation,
    ratings: &'c RatingModel,
}

impl<'c> LineupSelector<'c> {
    pub fn new(formation: Formation, ratings: &'c RatingModel) -> Self {
        Self { formation, ratings }
    }

    /// Picks the starting eleven. With `fixed` ids the roster players carrying
    /// those ids are used as-is, grouped by their own position.
    pub fn select<'a>(&self, roster: &'a Roster, fixed: Option<&[PlayerId]>) -> Lineup<'a> {
        match fixed {
            Some(ids) => Self::fixed(roster, ids),
            None => self.best_available(roster),
        }
    }

    fn fixed<'a>(roster: &'a Roster, ids: &[PlayerId]) -> Lineup<'a> {
        let wanted: HashSet<PlayerId> = ids.iter().copied().collect();
        let mut lineup = Lineup::default();
        for player in roster.players.iter().filter(|p| wanted.contains(&p.id)) {
            lineup.push(player);
        }
        if lineup.len() != wanted.len() {
            debug!(
                team = %roster.name,
                requested = wanted.len(),
                found = lineup.len(),
                "fixed lineup references players outside the roster"
            );
        }
        lineup
    }

    fn best_available<'a>(&self, roster: &'a Roster) -> Lineup<'a> {
        let squad_size = self.formation.size();

        // Stable sort keeps roster order on ties.
        let mut ranked: Vec<(f32, &'a Player)> =
            roster.players.iter().map(|p| (self.ratings.skill(p), p)).collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut taken = vec![false; ranked.len()];
        let mut lineup = Lineup::default();

        for position in Position::ALL {
            let quota = self.formation.quota(position);
            let mut filled = 0;
            for (i, (_, player)) in ranked.iter().enumerate() {
                if filled == quota {
                    break;
                }
                if !taken[i] && player.position == position {
                    taken[i] = true;
                    lineup.push(player);
                    filled += 1;
                }
            }
        }

        // Top up from the best leftovers of any position.
        for (i, (_, player)) in ranked.iter().enumerate() {
            if lineup.len() >= squad_size {
                break;
            }
            if !taken[i] {
                taken[i] = true;
                lineup.push(player);
            }
        }

        lineup
    }
}
