//! Penalty shootout for knockout fixtures level at full time.
//!
//! Regulation rounds alternate home then away and stop early once one side
//! cannot be caught. Sudden death plays complete pairs until they differ.
//! The regulation score is never touched.

use rand::Rng;
use tracing::warn;

use super::MatchEngine;
use crate::engine::lineup::Lineup;
use crate::models::{EventKind, Player, ShootoutKick, ShootoutResult, Side};

/// Kicker order: starting outfielders by raw penalty taking, best first.
/// Ties keep lineup order. Falls back to every starter when no outfielder
/// is available.
pub fn kicker_order<'a>(lineup: &Lineup<'a>) -> Vec<&'a Player> {
    let mut order: Vec<&'a Player> = lineup.outfield().collect();
    if order.is_empty() {
        order = lineup.starters().collect();
    }
    order.sort_by(|a, b| b.penalty_taking.cmp(&a.penalty_taking));
    order
}

#[derive(Debug, Default)]
struct Tally {
    goals: u8,
    taken: u8,
}

impl<'a> MatchEngine<'a> {
    pub(super) fn resolve_shootout(&mut self) -> ShootoutResult {
        self.emit(|_| EventKind::ShootoutStart);

        let rounds = self.config.penalty.shootout_rounds;
        let home_order = kicker_order(&self.home.lineup);
        let away_order = kicker_order(&self.away.lineup);

        let mut home = Tally::default();
        let mut away = Tally::default();
        let mut kicks = Vec::new();

        'regulation: for round in 0..rounds {
            self.emit(|_| EventKind::ShootoutRound { round: round + 1, sudden_death: false });

            for side in [Side::Home, Side::Away] {
                let (order, tally) = match side {
                    Side::Home => (&home_order, &mut home),
                    Side::Away => (&away_order, &mut away),
                };
                let Some(&taker) = order.get(round as usize % order.len().max(1)) else {
                    continue;
                };
                if self.shootout_kick(side, taker, &mut kicks) {
                    tally.goals = tally.goals.saturating_add(1);
                }
                tally.taken = tally.taken.saturating_add(1);

                if out_of_reach(&home, &away, rounds) {
                    self.emit_shootout_score(&home, &away);
                    break 'regulation;
                }
            }

            self.emit_shootout_score(&home, &away);
        }

        let mut decided_by_lot = false;
        if home.goals == away.goals {
            let cap = self.config.penalty.sudden_death_cap;
            let mut round: u16 = 0;
            while home.goals == away.goals && round < cap {
                let display_round = (rounds as u16 + round + 1).min(u8::MAX as u16) as u8;
                self.emit(|_| EventKind::ShootoutRound { round: display_round, sudden_death: true });

                let index = rounds as usize + round as usize;
                for (side, order, tally) in
                    [(Side::Home, &home_order, &mut home), (Side::Away, &away_order, &mut away)]
                {
                    let Some(&taker) = order.get(index % order.len().max(1)) else {
                        continue;
                    };
                    if self.shootout_kick(side, taker, &mut kicks) {
                        tally.goals = tally.goals.saturating_add(1);
                    }
                    tally.taken = tally.taken.saturating_add(1);
                }

                self.emit_shootout_score(&home, &away);
                round += 1;
            }

            if home.goals == away.goals {
                warn!(
                    home = %self.home.roster.name,
                    away = %self.away.roster.name,
                    rounds = cap,
                    "sudden death cap reached; drawing shootout winner by lot"
                );
                decided_by_lot = true;
            }
        }

        let winner = if home.goals > away.goals {
            Side::Home
        } else if away.goals > home.goals {
            Side::Away
        } else if self.rng.gen_bool(0.5) {
            Side::Home
        } else {
            Side::Away
        };

        let (home_goals, away_goals) = (home.goals, away.goals);
        self.emit(|_| EventKind::ShootoutEnd { winner, home: home_goals, away: away_goals, decided_by_lot });

        ShootoutResult {
            home_goals,
            away_goals,
            kicks_taken_home: home.taken,
            kicks_taken_away: away.taken,
            winner,
            decided_by_lot,
            kicks,
        }
    }

    fn shootout_kick(&mut self, side: Side, taker: &'a Player, kicks: &mut Vec<ShootoutKick>) -> bool {
        let keeper = self.team(side.opponent()).lineup.goalkeeper();
        let roll = self.penalty_roll(taker, keeper);
        let scored = roll.is_goal();

        kicks.push(ShootoutKick {
            kick_index: (kicks.len() + 1).min(u8::MAX as usize) as u8,
            side,
            taker_id: taker.id,
            taker_name: taker.name.clone(),
            scored,
        });
        self.emit(|_| EventKind::ShootoutKick {
            side,
            taker: taker.name.clone(),
            keeper: keeper.map(|k| k.name.clone()).unwrap_or_default(),
            roll,
        });
        scored
    }

    fn emit_shootout_score(&mut self, home: &Tally, away: &Tally) {
        let (home, away) = (home.goals, away.goals);
        self.emit(|_| EventKind::ShootoutScore { home, away });
    }
}

/// True once either side leads by more than the other's remaining kicks.
fn out_of_reach(home: &Tally, away: &Tally, rounds: u8) -> bool {
    let home_left = rounds.saturating_sub(home.taken);
    let away_left = rounds.saturating_sub(away.taken);
    home.goals > away.goals.saturating_add(away_left) || away.goals > home.goals.saturating_add(home_left)
}
