//! Scheduled free kicks.
//!
//! ## Schedule
//! Count = max(floor, trunc(N(mean, std_dev))). Each kick gets a uniform
//! minute in 1..=full time, a fair-coin side and a zone drawn by likelihood.
//!
//! ## Resolution
//! One roll picks direct shot, indirect attack or a safe restart using the
//! zone's cumulative probabilities.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::Normal;
use tracing::trace;

use super::match_state::{ScheduledFreeKick, Zone};
use super::MatchEngine;
use crate::engine::probability::{roll_shot, GoalChance};
use crate::models::{EventKind, FreeKickZone, ShotType, Side};

impl<'a> MatchEngine<'a> {
    pub(super) fn schedule_free_kicks(&mut self) {
        let cfg = &self.config.free_kick;
        let full_time = self.config.flow.full_time_minute;

        let drawn = match Normal::new(cfg.count_mean, cfg.count_std_dev) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => cfg.count_mean,
        };
        // truncation toward zero, then the floor
        let count = (drawn.trunc().clamp(0.0, u8::MAX as f32) as u8).max(cfg.count_floor);
        if count == 0 || full_time == 0 {
            return;
        }

        let zones = match WeightedIndex::new(cfg.zones.weights()) {
            Ok(zones) => zones,
            Err(err) => {
                trace!(%err, "free kick zones have no weight; skipping schedule");
                return;
            }
        };

        let free_kicks = (0..count)
            .map(|_| ScheduledFreeKick {
                minute: self.rng.gen_range(1..=full_time),
                side: if self.rng.gen_bool(0.5) { Side::Home } else { Side::Away },
                zone: FreeKickZone::ALL[zones.sample(&mut self.rng)],
            })
            .collect();
        self.state.schedule(free_kicks);
    }

    pub(super) fn resolve_free_kick(&mut self, fk: ScheduledFreeKick) {
        let zone_cfg = *self.config.free_kick.zones.get(fk.zone);
        let attacker = fk.side;
        self.emit(|_| EventKind::FreeKickAwarded { side: attacker, zone: fk.zone });

        let roll: f32 = self.rng.gen();
        if roll < zone_cfg.direct {
            self.direct_free_kick(attacker, zone_cfg.distance_factor);
        } else if roll < zone_cfg.direct + zone_cfg.indirect {
            self.team_mut(attacker).stats.passes_won += 1;
            self.emit(|_| EventKind::IndirectFreeKick { side: attacker });
            self.state.possession = attacker;
            self.state.zone = Zone::Attack(attacker);
            self.attack(attacker, zone_cfg.defense_modifier);
        } else {
            self.emit(|_| EventKind::FreeKickRestart { side: attacker });
            self.state.possession = attacker;
            self.state.zone = Zone::Midfield;
        }
    }

    fn direct_free_kick(&mut self, attacker: Side, distance_factor: f32) {
        let config = self.config;
        let defender = attacker.opponent();
        let taker = self.team(attacker).free_kick_taker;
        let keeper = self.team(defender).lineup.goalkeeper();
        let (Some(taker), Some(keeper)) = (taker, keeper) else {
            self.state.turnover(defender);
            return;
        };

        self.emit(|_| EventKind::DirectFreeKick { side: attacker, taker: taker.name.clone() });
        self.team_mut(attacker).stats.shots += 1;

        let chance = GoalChance {
            shooter_rating: self.ratings.free_kick(taker),
            keeper_rating: self.ratings.skill(keeper),
            scaling: config.free_kick.scaling,
            conversion: config.free_kick.conversion_base * distance_factor,
        };
        let roll = roll_shot(&mut self.rng, chance, config.shot.shooter_noise, config.shot.keeper_noise);

        self.finish_shot(attacker, ShotType::DirectFreeKick, taker, keeper, roll, None);
        self.state.turnover(defender);
    }
}
