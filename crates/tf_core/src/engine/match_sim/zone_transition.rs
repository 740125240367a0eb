//! Zone transitions: midfield contests, attacks, shots and penalties.

use rand::Rng;

use super::match_state::Zone;
use super::MatchEngine;
use crate::engine::probability::{distance_modifier, logistic_probability, roll_shot, sample_shot_distance, GoalChance};
use crate::models::{Contest, DangerTier, EventKind, GoalRecord, Player, ShotRoll, ShotType, Side};

impl<'a> MatchEngine<'a> {
    /// Exactly one transition per open-play tick.
    pub(super) fn step(&mut self) {
        match self.state.zone {
            Zone::Midfield => self.midfield_contest(),
            Zone::Attack(side) => self.attack(side, 1.0),
        }
    }

    fn midfield_contest(&mut self) {
        let attacker = self.state.possession;
        let defender = attacker.opponent();
        let attack = self.team(attacker).strength.midfield;
        let defense = self.team(defender).strength.midfield;
        let probability = logistic_probability(attack, defense, self.config.flow.midfield_scaling);
        let roll: f32 = self.rng.gen();
        let contest = Contest { attack, defense, probability, roll };

        if roll < probability {
            self.state.zone = Zone::Attack(attacker);
            self.team_mut(attacker).stats.passes_won += 1;
            self.emit(|_| EventKind::MidfieldAdvance { side: attacker, contest });
        } else {
            self.state.possession = defender;
            self.team_mut(defender).stats.tackles_won += 1;
            self.emit(|_| EventKind::BallWon { side: defender, contest });
        }
    }

    /// Attack against the defensive gate. `defense_modifier` below 1.0 weakens
    /// the gate (indirect free kicks).
    pub(super) fn attack(&mut self, attacker: Side, defense_modifier: f32) {
        let flow = &self.config.flow;
        let defender = attacker.opponent();
        let wall = self.team(defender).strength;
        let gate = ((1.0 - flow.goalkeeper_gate_weight) * wall.defense
            + flow.goalkeeper_gate_weight * wall.goalkeeper)
            * defense_modifier;
        let attack = self.team(attacker).strength.attack;
        let probability = logistic_probability(attack, gate, flow.attack_scaling);
        let roll: f32 = self.rng.gen();
        let contest = Contest { attack, defense: gate, probability, roll };

        if roll < probability {
            self.emit(|_| EventKind::ShotOpportunity { side: attacker, contest, defense_modifier });
            self.resolve_shot(attacker);
        } else if self.rng.gen::<f32>() < self.config.flow.penalty_award_probability {
            self.emit(|_| EventKind::PenaltyAwarded { side: attacker });
            self.resolve_penalty(attacker);
        } else {
            self.team_mut(defender).stats.tackles_won += 1;
            self.state.turnover(defender);
            self.emit(|_| EventKind::DefensiveStop { side: defender, contest });
        }
    }

    fn resolve_shot(&mut self, attacker: Side) {
        let config = self.config;
        let defender = attacker.opponent();
        let shooter = match attacker {
            Side::Home => self.home.random_shooter(&mut self.rng),
            Side::Away => self.away.random_shooter(&mut self.rng),
        };
        let keeper = self.team(defender).lineup.goalkeeper();
        let (Some(shooter), Some(keeper)) = (shooter, keeper) else {
            self.state.turnover(defender);
            return;
        };

        self.team_mut(attacker).stats.shots += 1;

        let model = &config.shot.distance;
        let distance = model.enabled.then(|| sample_shot_distance(&mut self.rng, model));
        let conversion = config.shot.conversion * distance.map_or(1.0, |d| distance_modifier(d, model));
        let chance = GoalChance {
            shooter_rating: self.ratings.skill(shooter),
            keeper_rating: self.ratings.skill(keeper),
            scaling: config.shot.scaling,
            conversion,
        };
        let roll = roll_shot(&mut self.rng, chance, config.shot.shooter_noise, config.shot.keeper_noise);

        self.finish_shot(attacker, ShotType::OpenPlay, shooter, keeper, roll, distance);
        self.state.turnover(defender);
    }

    pub(super) fn resolve_penalty(&mut self, attacker: Side) {
        let defender = attacker.opponent();
        let taker = self.team(attacker).penalty_taker;
        let keeper = self.team(defender).lineup.goalkeeper();
        let (Some(taker), Some(keeper)) = (taker, keeper) else {
            self.state.turnover(defender);
            return;
        };

        self.team_mut(attacker).stats.shots += 1;
        let roll = self.penalty_roll(taker, Some(keeper));
        self.finish_shot(attacker, ShotType::Penalty, taker, keeper, roll, None);
        self.state.turnover(defender);
    }

    /// Penalty model shared by in-game penalties and the shootout. An empty
    /// goal rates the keeper at zero.
    pub(super) fn penalty_roll(&mut self, taker: &Player, keeper: Option<&Player>) -> ShotRoll {
        let config = self.config;
        let chance = GoalChance {
            shooter_rating: self.ratings.penalty_taking(taker),
            keeper_rating: keeper.map_or(0.0, |k| self.ratings.penalty_saving(k)),
            scaling: config.penalty.scaling,
            conversion: config.penalty.conversion,
        };
        roll_shot(&mut self.rng, chance, config.shot.shooter_noise, config.shot.keeper_noise)
    }

    /// Applies a resolved regulation shot to the score and the log.
    pub(super) fn finish_shot(
        &mut self,
        side: Side,
        shot: ShotType,
        shooter: &'a Player,
        keeper: &'a Player,
        roll: ShotRoll,
        distance: Option<f32>,
    ) {
        let danger = Some(DangerTier::from_probability(roll.probability));

        if roll.is_goal() {
            self.team_mut(side).record_goal(shooter.id);
            self.goals.push(GoalRecord {
                minute: self.state.minute,
                side,
                player_id: shooter.id,
                player_name: shooter.name.clone(),
                shot,
            });
            let (home, away) = (self.home.score, self.away.score);
            self.emit_with(distance, danger, |_| EventKind::Goal {
                side,
                shot,
                scorer_id: shooter.id,
                scorer: shooter.name.clone(),
                keeper: keeper.name.clone(),
                roll,
                home,
                away,
            });
        } else {
            let saved = roll.roll - roll.probability < self.config.shot.save_margin;
            self.emit_with(distance, danger, |_| EventKind::ShotMissed {
                side,
                shot,
                shooter_id: shooter.id,
                shooter: shooter.name.clone(),
                keeper: keeper.name.clone(),
                roll,
                saved,
            });
        }
    }
}
