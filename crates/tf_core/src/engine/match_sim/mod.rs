//! # Match Simulation
//!
//! Minute-by-minute zone state machine. One [`MatchEngine`] plays exactly one
//! match and is consumed by [`MatchEngine::simulate`].
//!
//! ## Flow
//! 1. Both lineups are selected; a side short of eleven abandons the match.
//! 2. Free kicks are scheduled at kickoff.
//! 3. The clock advances in random steps. Scheduled free kicks that fall
//!    inside a step are resolved first, at their own minute, then one zone
//!    transition runs.
//! 4. Knockout fixtures level at full time go to a shootout.
//! 5. Morale updates are computed if enabled; they are never applied here.

mod dominance;
mod match_state;
mod match_team;
mod set_pieces;
mod shootout;
mod zone_transition;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use dominance::{dominance_target, smooth};
pub use match_state::Zone;
pub use shootout::kicker_order;

pub(crate) use match_team::MatchTeam;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use self::match_state::{EventLog, MatchState};
use crate::engine::config::EngineConfig;
use crate::engine::morale;
use crate::engine::ratings::RatingModel;
use crate::error::Result;
use crate::models::{
    DangerTier, EventKind, EventMetadata, GoalRecord, MatchResult, MatchStatistics, PlayerId,
    Roster, ShootoutResult, Side, TeamInfo,
};

/// Whether the home side receives the home-advantage boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    #[default]
    HomeAdvantage,
    Neutral,
}

/// Caller-controlled switches for a single match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatchOptions {
    pub knockout: bool,
    pub venue: Venue,
    /// Fixed RNG seed; a fresh one is drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Skip the event log. The abandonment event is still recorded.
    pub headless: bool,
    /// Leave `morale_updates` empty even when morale is enabled (odds runs).
    pub skip_morale: bool,
    pub home_lineup: Option<Vec<PlayerId>>,
    pub away_lineup: Option<Vec<PlayerId>>,
}

impl MatchOptions {
    pub fn knockout() -> Self {
        Self { knockout: true, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_venue(mut self, venue: Venue) -> Self {
        self.venue = venue;
        self
    }

    pub fn headless(mut self) -> Self {
        self.headless = true;
        self
    }

    pub fn without_morale(mut self) -> Self {
        self.skip_morale = true;
        self
    }
}

pub struct MatchEngine<'a> {
    config: &'a EngineConfig,
    ratings: RatingModel,
    rng: ChaCha8Rng,
    seed: u64,
    knockout: bool,
    compute_morale: bool,
    home: MatchTeam<'a>,
    away: MatchTeam<'a>,
    state: MatchState,
    log: EventLog,
    goals: Vec<GoalRecord>,
}

impl<'a> MatchEngine<'a> {
    pub fn new(
        home: &'a Roster,
        away: &'a Roster,
        options: &MatchOptions,
        config: &'a EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::prepare(home, away, options, config))
    }

    /// Builds an engine from an already validated config.
    pub(crate) fn prepare(
        home: &'a Roster,
        away: &'a Roster,
        options: &MatchOptions,
        config: &'a EngineConfig,
    ) -> Self {
        let seed = options.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ratings = RatingModel::from_config(&config.ratings);

        let home_boost = match options.venue {
            Venue::HomeAdvantage => config.flow.home_advantage,
            Venue::Neutral => 1.0,
        };
        let home_team =
            MatchTeam::new(home, Side::Home, options.home_lineup.as_deref(), home_boost, config, &ratings);
        let away_team =
            MatchTeam::new(away, Side::Away, options.away_lineup.as_deref(), 1.0, config, &ratings);

        let possession = if rng.gen_bool(0.5) { Side::Home } else { Side::Away };

        Self {
            config,
            ratings,
            rng,
            seed,
            knockout: options.knockout,
            compute_morale: !options.skip_morale,
            home: home_team,
            away: away_team,
            state: MatchState::new(possession),
            log: EventLog::new(!options.headless),
            goals: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn simulate(mut self) -> MatchResult {
        debug!(
            home = %self.home.roster.name,
            away = %self.away.roster.name,
            knockout = self.knockout,
            seed = self.seed,
            "match start"
        );

        let squad_size = self.config.lineup.formation.size();
        let home_available = self.home.lineup.len();
        let away_available = self.away.lineup.len();
        if home_available != squad_size || away_available != squad_size {
            warn!(
                home = %self.home.roster.name,
                away = %self.away.roster.name,
                home_available,
                away_available,
                "match abandoned: lineup is not a full eleven"
            );
            self.log.push(
                0,
                EventKind::Abandoned {
                    home_available: clamp_u8(home_available),
                    away_available: clamp_u8(away_available),
                },
                EventMetadata::default(),
            );
            return self.into_result(None, true);
        }

        self.schedule_free_kicks();
        let scheduled = clamp_u8(self.state.scheduled_count());
        self.emit(|_| EventKind::Kickoff { scheduled_free_kicks: scheduled });

        self.play_regulation();

        let (home, away) = (self.home.score, self.away.score);
        self.emit(|_| EventKind::FullTime { home, away });

        let shootout = if self.knockout && home == away { Some(self.resolve_shootout()) } else { None };

        debug!(
            home = self.home.score,
            away = self.away.score,
            shootout = shootout.is_some(),
            "match finished"
        );
        self.into_result(shootout, false)
    }

    fn play_regulation(&mut self) {
        let full_time = self.config.flow.full_time_minute;
        let (step_min, step_max) = (self.config.flow.clock_step_min, self.config.flow.clock_step_max);

        while self.state.minute < full_time {
            let tick_start = self.state.minute;
            let step: u8 = self.rng.gen_range(step_min..=step_max);
            let tick_end = tick_start.saturating_add(step).min(full_time);

            while let Some(fk) = self.state.pop_due(tick_end) {
                self.advance_clock(fk.minute);
                self.resolve_free_kick(fk);
            }
            // A free kick on the final minute consumes the tick.
            if self.state.minute >= full_time {
                break;
            }

            self.record_tick(tick_end - tick_start);
            self.advance_clock(tick_end);
            self.update_dominance();
            self.step();
        }
    }

    /// Moves the clock forward (never back) and emits halftime once.
    fn advance_clock(&mut self, minute: u8) {
        self.state.minute = self.state.minute.max(minute);
        if !self.state.halftime_reached && self.state.minute >= self.config.flow.halftime_minute {
            self.state.halftime_reached = true;
            self.emit(|_| EventKind::HalfTime);
        }
    }

    fn record_tick(&mut self, minutes: u8) {
        let possession = self.state.possession;
        let attacking = self.state.is_attacking(possession);
        let stats = &mut self.team_mut(possession).stats;
        stats.possession_minutes += minutes as u32;
        if attacking {
            stats.territorial_minutes += minutes as u32;
        }
    }

    fn update_dominance(&mut self) {
        let cfg = &self.config.dominance;
        if let Some(target) = dominance_target(&self.home.stats, &self.away.stats, cfg) {
            self.state.dominance = smooth(self.state.dominance, target, cfg.momentum);
        }
    }

    fn team(&self, side: Side) -> &MatchTeam<'a> {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    fn team_mut(&mut self, side: Side) -> &mut MatchTeam<'a> {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    fn emit(&mut self, build: impl FnOnce(&Self) -> EventKind) {
        self.emit_with(None, None, build);
    }

    /// Builds the event lazily so headless runs skip the allocations.
    fn emit_with(
        &mut self,
        distance: Option<f32>,
        danger: Option<DangerTier>,
        build: impl FnOnce(&Self) -> EventKind,
    ) {
        if !self.log.is_enabled() {
            return;
        }
        let kind = build(self);
        let metadata = EventMetadata { dominance: self.state.dominance, distance, danger };
        self.log.push(self.state.minute, kind, metadata);
    }

    fn into_result(mut self, shootout: Option<ShootoutResult>, abandoned: bool) -> MatchResult {
        let morale_updates = if self.compute_morale && self.config.morale.enabled && !abandoned {
            Some(morale::compute_updates(&self.home, &self.away, shootout.as_ref(), &self.config.morale))
        } else {
            None
        };

        if let Some(updates) = &morale_updates {
            for update in updates.iter().filter(|u| u.delta != 0) {
                self.emit(|_| EventKind::MoraleChange {
                    side: update.side,
                    player_id: update.player_id,
                    player: update.player_name.clone(),
                    personality: update.personality,
                    old: update.old_morale,
                    new: update.new_morale,
                    delta: update.delta,
                });
            }
        }

        MatchResult {
            events: self.log.into_events(),
            home: TeamInfo::from(self.home.roster),
            away: TeamInfo::from(self.away.roster),
            score_home: self.home.score,
            score_away: self.away.score,
            knockout: self.knockout,
            seed: self.seed,
            abandoned,
            goals: self.goals,
            statistics: MatchStatistics { home: self.home.stats, away: self.away.stats },
            shootout,
            morale_updates,
        }
    }
}

fn clamp_u8(n: usize) -> u8 {
    n.min(u8::MAX as usize) as u8
}
