//! # Pre-Match Odds
//!
//! Monte-Carlo estimate of a fixture in both orientations: the user side at
//! home, then away. Every run is an independent headless match with its own
//! seeded stream, so runs may be spread over the rayon pool and the
//! aggregates stay identical to a sequential pass.
//!
//! Odds estimation never computes or commits morale.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::config::EngineConfig;
use crate::engine::match_sim::{MatchEngine, MatchOptions, MatchTeam, Venue};
use crate::engine::ratings::RatingModel;
use crate::error::Result;
use crate::models::{FixtureOdds, OddsSummary, OutcomeOdds, PlayerId, Roster, Side, TeamSnapshot};

/// Seed distance between the two orientations' streams.
const AWAY_STREAM_OFFSET: u64 = 1 << 32;

/// Runs scheduled between two time-budget checks.
const BATCH_SIZE: u32 = 64;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OddsRequest {
    /// Runs per orientation; the configured default when absent.
    pub runs: Option<u32>,
    /// Frozen user lineup, honoured in both orientations.
    pub fixed_user_lineup: Option<Vec<PlayerId>>,
    pub seed: Option<u64>,
    pub parallel: bool,
    /// Stop scheduling new runs once this much wall-clock time has passed.
    pub time_budget_ms: Option<u64>,
    pub venue: Venue,
}

impl Default for OddsRequest {
    fn default() -> Self {
        Self {
            runs: None,
            fixed_user_lineup: None,
            seed: None,
            parallel: true,
            time_budget_ms: None,
            venue: Venue::HomeAdvantage,
        }
    }
}

impl OddsRequest {
    pub fn with_runs(mut self, runs: u32) -> Self {
        self.runs = Some(runs);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Odds under the default configuration.
pub fn get_prematch_odds(user: &Roster, enemy: &Roster, request: &OddsRequest) -> OddsSummary {
    estimate(user, enemy, request, &EngineConfig::default())
}

pub fn get_prematch_odds_with(
    user: &Roster,
    enemy: &Roster,
    request: &OddsRequest,
    config: &EngineConfig,
) -> Result<OddsSummary> {
    config.validate()?;
    Ok(estimate(user, enemy, request, config))
}

fn estimate(user: &Roster, enemy: &Roster, request: &OddsRequest, config: &EngineConfig) -> OddsSummary {
    let runs = request.runs.unwrap_or(config.odds.default_runs).min(config.odds.max_runs);
    let base_seed = request.seed.unwrap_or_else(rand::random);
    let deadline = request.time_budget_ms.map(|ms| Instant::now() + Duration::from_millis(ms));

    debug!(user = %user.name, enemy = %enemy.name, runs, base_seed, "estimating pre-match odds");

    let plan = FixturePlan { user, enemy, request, config, runs, deadline };
    let home_fixture = plan.run(Side::Home, base_seed);
    let away_fixture = plan.run(Side::Away, base_seed.wrapping_add(AWAY_STREAM_OFFSET));

    info!(
        user = %user.name,
        enemy = %enemy.name,
        home_win_pct = home_fixture.outcome.win_pct,
        away_win_pct = away_fixture.outcome.win_pct,
        runs_home = home_fixture.outcome.runs,
        runs_away = away_fixture.outcome.runs,
        "pre-match odds ready"
    );

    OddsSummary { runs_requested: runs, home_fixture, away_fixture }
}

struct FixturePlan<'a> {
    user: &'a Roster,
    enemy: &'a Roster,
    request: &'a OddsRequest,
    config: &'a EngineConfig,
    runs: u32,
    deadline: Option<Instant>,
}

/// Goals for and against the user side in one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    runs: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals_for: u32,
    goals_against: u32,
}

impl Tally {
    fn single(goals_for: u8, goals_against: u8) -> Self {
        Self {
            runs: 1,
            wins: (goals_for > goals_against) as u32,
            draws: (goals_for == goals_against) as u32,
            losses: (goals_for < goals_against) as u32,
            goals_for: goals_for as u32,
            goals_against: goals_against as u32,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            runs: self.runs + other.runs,
            wins: self.wins + other.wins,
            draws: self.draws + other.draws,
            losses: self.losses + other.losses,
            goals_for: self.goals_for + other.goals_for,
            goals_against: self.goals_against + other.goals_against,
        }
    }

    fn odds(&self) -> OutcomeOdds {
        if self.runs == 0 {
            return OutcomeOdds::default();
        }
        let n = self.runs as f32;
        OutcomeOdds {
            runs: self.runs,
            win_pct: self.wins as f32 / n * 100.0,
            draw_pct: self.draws as f32 / n * 100.0,
            loss_pct: self.losses as f32 / n * 100.0,
            avg_goals_for: self.goals_for as f32 / n,
            avg_goals_against: self.goals_against as f32 / n,
        }
    }
}

impl<'a> FixturePlan<'a> {
    fn run(&self, user_side: Side, base_seed: u64) -> FixtureOdds {
        let mut tally = Tally::default();
        let mut next = 0u32;

        while next < self.runs {
            if self.deadline.is_some_and(|d| Instant::now() >= d) {
                debug!(completed = next, requested = self.runs, "odds time budget exhausted");
                break;
            }
            let batch = next..(next + BATCH_SIZE).min(self.runs);
            let seed_of = |i: u32| base_seed.wrapping_add(i as u64);
            let batch_tally = if self.request.parallel {
                batch.into_par_iter().map(|i| self.play(user_side, seed_of(i))).reduce(Tally::default, Tally::merge)
            } else {
                batch.map(|i| self.play(user_side, seed_of(i))).fold(Tally::default(), Tally::merge)
            };
            tally = tally.merge(batch_tally);
            next = (next + BATCH_SIZE).min(self.runs);
        }

        let (user, enemy) = self.snapshots(user_side);
        FixtureOdds { user_side, outcome: tally.odds(), user, enemy }
    }

    fn options(&self, user_side: Side, seed: Option<u64>) -> MatchOptions {
        let fixed = self.request.fixed_user_lineup.clone();
        let (home_lineup, away_lineup) = match user_side {
            Side::Home => (fixed, None),
            Side::Away => (None, fixed),
        };
        MatchOptions {
            knockout: false,
            venue: self.request.venue,
            seed,
            headless: true,
            skip_morale: true,
            home_lineup,
            away_lineup,
        }
    }

    fn fixture(&self, user_side: Side) -> (&'a Roster, &'a Roster) {
        match user_side {
            Side::Home => (self.user, self.enemy),
            Side::Away => (self.enemy, self.user),
        }
    }

    fn play(&self, user_side: Side, seed: u64) -> Tally {
        let (home, away) = self.fixture(user_side);
        let options = self.options(user_side, Some(seed));
        let result = MatchEngine::prepare(home, away, &options, self.config).simulate();
        let user_goals = result.goals_for(user_side);
        let enemy_goals = result.goals_for(user_side.opponent());
        Tally::single(user_goals, enemy_goals)
    }

    fn snapshots(&self, user_side: Side) -> (TeamSnapshot, TeamSnapshot) {
        let ratings = RatingModel::from_config(&self.config.ratings);
        let home_boost = match self.request.venue {
            Venue::HomeAdvantage => self.config.flow.home_advantage,
            Venue::Neutral => 1.0,
        };
        let fixed = self.request.fixed_user_lineup.as_deref();
        let boost_of = |side: Side| if side.is_home() { home_boost } else { 1.0 };

        let user = MatchTeam::new(self.user, user_side, fixed, boost_of(user_side), self.config, &ratings);
        let enemy_side = user_side.opponent();
        let enemy = MatchTeam::new(self.enemy, enemy_side, None, boost_of(enemy_side), self.config, &ratings);
        (user.snapshot(&ratings), enemy.snapshot(&ratings))
    }
}
