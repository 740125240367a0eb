//! # Post-Match Morale
//!
//! Morale changes are computed once the final whistle has gone and attached
//! to the [`MatchResult`]. They are never written back during simulation;
//! persisting them is an explicit [`MatchResult::commit_morale`] call through
//! a [`MoraleStore`].
//!
//! ## Per player
//! - **Starters**: result delta × margin multiplier × personality multiplier
//! - **Bench**: drift toward the target morale instead of the result delta
//! - **Scorers**: per-goal bonus, or the flat hat-trick bonus
//!
//! The total is rounded and the new value clamped to 0..=100.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::engine::config::MoraleConfig;
use crate::engine::match_sim::MatchTeam;
use crate::error::MoraleCommitError;
use crate::models::{
    EventKind, EventMetadata, MatchEvent, MatchResult, MoraleUpdate, Player, Roster, ShootoutResult, Side,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

/// A side's view of the final result. Shootout decisions count as a win or
/// loss with zero margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamOutcome {
    pub outcome: MatchOutcome,
    /// Goals for minus goals against.
    pub margin: i32,
}

impl TeamOutcome {
    pub fn classify(goals_for: u8, goals_against: u8, shootout_won: Option<bool>) -> Self {
        if let Some(won) = shootout_won {
            let outcome = if won { MatchOutcome::Win } else { MatchOutcome::Loss };
            return Self { outcome, margin: 0 };
        }
        let margin = goals_for as i32 - goals_against as i32;
        let outcome = match margin.signum() {
            1 => MatchOutcome::Win,
            -1 => MatchOutcome::Loss,
            _ => MatchOutcome::Draw,
        };
        Self { outcome, margin }
    }

    /// Base change and sentiment before personality scaling.
    fn base_change(&self, avg_starting_morale: f32, cfg: &MoraleConfig) -> (f32, bool) {
        let significant = self.margin.unsigned_abs() >= cfg.margin_threshold as u32;
        let multiplier = if significant { cfg.margin_multiplier } else { 1.0 };
        match self.outcome {
            MatchOutcome::Win => (cfg.win_change * multiplier, true),
            MatchOutcome::Loss => (cfg.loss_change * multiplier, false),
            // a draw lifts a low-morale side
            MatchOutcome::Draw => (cfg.draw_change, avg_starting_morale < cfg.drift_target),
        }
    }
}

/// Performance bonus for `goals` scored.
pub fn performance_bonus(goals: u8, cfg: &MoraleConfig) -> f32 {
    if goals >= cfg.hat_trick_goals {
        cfg.hat_trick_bonus
    } else {
        goals as f32 * cfg.goal_bonus
    }
}

/// Pull toward the drift target for a player who did not start.
pub fn bench_drift(morale: u8, cfg: &MoraleConfig) -> f32 {
    (cfg.drift_target - morale as f32) * cfg.drift_rate
}

/// One update per roster player, both sides, home first.
pub(crate) fn compute_updates(
    home: &MatchTeam<'_>,
    away: &MatchTeam<'_>,
    shootout: Option<&ShootoutResult>,
    cfg: &MoraleConfig,
) -> Vec<MoraleUpdate> {
    let mut updates = Vec::with_capacity(home.roster.players.len() + away.roster.players.len());
    for (team, opponent) in [(home, away), (away, home)] {
        let shootout_won = shootout.map(|s| s.winner == team.side);
        let outcome = TeamOutcome::classify(team.score, opponent.score, shootout_won);
        team_updates(team, outcome, cfg, &mut updates);
    }
    updates
}

fn team_updates(team: &MatchTeam<'_>, outcome: TeamOutcome, cfg: &MoraleConfig, out: &mut Vec<MoraleUpdate>) {
    let starters = team.lineup.len().max(1) as f32;
    let avg_morale = team.lineup.starters().map(|p| p.morale as f32).sum::<f32>() / starters;
    let (base, positive) = outcome.base_change(avg_morale, cfg);

    for player in &team.roster.players {
        let started = team.lineup.contains(player.id);
        let outcome_change =
            if started { base * cfg.personality.multiplier(player.personality, positive) } else { 0.0 };
        let performance_change = performance_bonus(team.goals_by(player.id), cfg);
        let drift_change = if started { 0.0 } else { bench_drift(player.morale, cfg) };

        out.push(morale_update(
            player,
            team.side,
            started,
            outcome_change,
            performance_change,
            drift_change,
        ));
    }
}

fn morale_update(
    player: &Player,
    side: Side,
    started: bool,
    outcome_change: f32,
    performance_change: f32,
    drift_change: f32,
) -> MoraleUpdate {
    let total = (outcome_change + performance_change + drift_change).round() as i32;
    let new_morale = (player.morale as i32 + total).clamp(0, 100) as u8;
    MoraleUpdate {
        player_id: player.id,
        player_name: player.name.clone(),
        side,
        personality: player.personality,
        started,
        old_morale: player.morale,
        new_morale,
        delta: total,
        outcome_change,
        performance_change,
        drift_change,
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// Destination for computed morale updates. Implementations must apply all
/// updates or none.
pub trait MoraleStore {
    fn commit(&mut self, updates: &[MoraleUpdate]) -> Result<(), MoraleCommitError>;
}

/// Writes morale straight into the two in-memory rosters of a fixture.
pub struct RosterMoraleStore<'r> {
    home: &'r mut Roster,
    away: &'r mut Roster,
}

impl<'r> RosterMoraleStore<'r> {
    pub fn new(home: &'r mut Roster, away: &'r mut Roster) -> Self {
        Self { home, away }
    }

    fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Home => &*self.home,
            Side::Away => &*self.away,
        }
    }

    fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Home => &mut *self.home,
            Side::Away => &mut *self.away,
        }
    }
}

impl MoraleStore for RosterMoraleStore<'_> {
    fn commit(&mut self, updates: &[MoraleUpdate]) -> Result<(), MoraleCommitError> {
        if let Some(missing) = updates.iter().find(|u| self.roster(u.side).player(u.player_id).is_none()) {
            return Err(MoraleCommitError::UnknownPlayer(missing.player_id));
        }
        for update in updates {
            if let Some(player) = self.roster_mut(update.side).player_mut(update.player_id) {
                player.morale = update.new_morale;
            }
        }
        Ok(())
    }
}

impl MatchResult {
    /// Persists the attached morale updates through `store`.
    ///
    /// Returns the number of players written. Failures are logged and
    /// recorded as an error event; score and updates are left untouched.
    pub fn commit_morale<S: MoraleStore + ?Sized>(&mut self, store: &mut S) -> Result<usize, MoraleCommitError> {
        let Some(updates) = self.morale_updates.as_deref() else {
            return Ok(0);
        };

        let outcome = store.commit(updates);
        let kind = match &outcome {
            Ok(()) => {
                debug!(players = updates.len(), "morale updates committed");
                EventKind::MoraleCommitted { players: updates.len() as u32 }
            }
            Err(err) => {
                error!(%err, recoverable = err.is_recoverable(), "morale commit failed");
                EventKind::MoraleCommitFailed { reason: err.to_string() }
            }
        };
        let written = updates.len();

        let last = self.events.last();
        let minute = last.map_or(0, |e| e.minute);
        let metadata = EventMetadata { dominance: last.map_or(0.0, |e| e.metadata.dominance), ..Default::default() };
        self.events.push(MatchEvent { minute, importance: kind.importance(), kind, metadata });

        outcome.map(|()| written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::EngineConfig;
    use crate::engine::match_sim::test_fixtures::*;
    use crate::engine::ratings::RatingModel;
    use crate::models::{Importance, Personality, PlayerId};
    use proptest::prelude::*;

    fn enabled() -> MoraleConfig {
        MoraleConfig { enabled: true, ..MoraleConfig::default() }
    }

    #[test]
    fn test_classify() {
        assert_eq!(TeamOutcome::classify(3, 0, None), TeamOutcome { outcome: MatchOutcome::Win, margin: 3 });
        assert_eq!(TeamOutcome::classify(0, 2, None), TeamOutcome { outcome: MatchOutcome::Loss, margin: -2 });
        assert_eq!(TeamOutcome::classify(1, 1, None).outcome, MatchOutcome::Draw);
        // shootouts override the level score
        assert_eq!(TeamOutcome::classify(1, 1, Some(true)), TeamOutcome { outcome: MatchOutcome::Win, margin: 0 });
        assert_eq!(TeamOutcome::classify(1, 1, Some(false)).outcome, MatchOutcome::Loss);
    }

    #[test]
    fn test_margin_multiplier_applies_at_threshold() {
        let cfg = enabled();
        let (narrow, _) = TeamOutcome::classify(2, 0, None).base_change(75.0, &cfg);
        let (wide, _) = TeamOutcome::classify(3, 0, None).base_change(75.0, &cfg);
        let (heavy_loss, positive) = TeamOutcome::classify(0, 4, None).base_change(75.0, &cfg);
        assert_eq!(narrow, 8.0);
        assert_eq!(wide, 12.0);
        assert_eq!(heavy_loss, -15.0);
        assert!(!positive);
    }

    #[test]
    fn test_draw_sentiment_follows_average_morale() {
        let cfg = enabled();
        let draw = TeamOutcome::classify(0, 0, None);
        assert_eq!(draw.base_change(60.0, &cfg), (1.0, true));
        assert_eq!(draw.base_change(80.0, &cfg), (1.0, false));
    }

    #[test]
    fn test_performance_bonus() {
        let cfg = enabled();
        assert_eq!(performance_bonus(0, &cfg), 0.0);
        assert_eq!(performance_bonus(2, &cfg), 6.0);
        assert_eq!(performance_bonus(3, &cfg), 10.0);
        assert_eq!(performance_bonus(5, &cfg), 10.0);
    }

    #[test]
    fn test_bench_drift_toward_target() {
        let cfg = enabled();
        assert!((bench_drift(40, &cfg) - 1.75).abs() < 1e-6);
        assert!((bench_drift(95, &cfg) + 1.0).abs() < 1e-6);
        assert_eq!(bench_drift(75, &cfg), 0.0);
    }

    fn teams<'a>(home: &'a Roster, away: &'a Roster, config: &'a EngineConfig) -> (MatchTeam<'a>, MatchTeam<'a>) {
        let ratings = RatingModel::base();
        (
            MatchTeam::new(home, Side::Home, None, 1.0, config, &ratings),
            MatchTeam::new(away, Side::Away, None, 1.0, config, &ratings),
        )
    }

    #[test]
    fn test_win_and_loss_by_personality() {
        let config = EngineConfig::default();
        let home = with_personality(squad("Home", 0), Personality::Volatile);
        let away = with_personality(squad("Away", 100), Personality::Ambitious);
        let (mut h, a) = teams(&home, &away, &config);
        h.record_goal(PlayerId(10));

        let updates = compute_updates(&h, &a, None, &enabled());
        assert_eq!(updates.len(), 22);

        // volatile winner: round(8 * 1.8) = 14, scorer +3 more
        let scorer = updates.iter().find(|u| u.player_id == PlayerId(10)).unwrap();
        assert_eq!(scorer.delta, 17);
        let keeper = updates.iter().find(|u| u.player_id == PlayerId(1)).unwrap();
        assert_eq!(keeper.delta, 14);
        assert_eq!(keeper.new_morale, 89);

        // ambitious loser: -10 * 0.8
        let loser = updates.iter().find(|u| u.player_id == PlayerId(101)).unwrap();
        assert_eq!(loser.delta, -8);
        assert!(updates.iter().all(|u| u.started));
    }

    #[test]
    fn test_bench_players_drift_instead_of_result() {
        let config = EngineConfig::default();
        let home = squad_with_bench("Home", 0, 3);
        let away = squad("Away", 100);
        let (h, mut a) = teams(&home, &away, &config);
        a.record_goal(PlayerId(110));

        let updates = compute_updates(&h, &a, None, &enabled());
        let sub = updates.iter().find(|u| u.player_id == PlayerId(50)).unwrap();
        assert!(!sub.started);
        assert_eq!(sub.outcome_change, 0.0);
        // (75 - 40) * 0.05 = 1.75 -> 2
        assert_eq!(sub.delta, 2);
        assert_eq!(sub.new_morale, 42);
    }

    #[test]
    fn test_shootout_winner_gets_win_delta() {
        let config = EngineConfig::default();
        let home = squad("Home", 0);
        let away = squad("Away", 100);
        let (h, a) = teams(&home, &away, &config);
        let shootout = ShootoutResult {
            home_goals: 3,
            away_goals: 4,
            kicks_taken_home: 5,
            kicks_taken_away: 5,
            winner: Side::Away,
            decided_by_lot: false,
            kicks: Vec::new(),
        };
        let updates = compute_updates(&h, &a, Some(&shootout), &enabled());
        assert!(updates.iter().filter(|u| u.side == Side::Away).all(|u| u.delta == 8));
        assert!(updates.iter().filter(|u| u.side == Side::Home).all(|u| u.delta == -10));
    }

    #[test]
    fn test_roster_store_is_atomic() {
        let mut home = squad("Home", 0);
        let mut away = squad("Away", 100);
        let update = |side, id: u32, new_morale| MoraleUpdate {
            player_id: PlayerId(id),
            player_name: String::new(),
            side,
            personality: Personality::Professional,
            started: true,
            old_morale: 75,
            new_morale,
            delta: new_morale as i32 - 75,
            outcome_change: 0.0,
            performance_change: 0.0,
            drift_change: 0.0,
        };

        let bad = [update(Side::Home, 1, 90), update(Side::Away, 5, 10)];
        let err = RosterMoraleStore::new(&mut home, &mut away).commit(&bad).unwrap_err();
        assert_eq!(err, MoraleCommitError::UnknownPlayer(PlayerId(5)));
        assert_eq!(home.player(PlayerId(1)).unwrap().morale, 75);

        let good = [update(Side::Home, 1, 90), update(Side::Away, 105, 10)];
        RosterMoraleStore::new(&mut home, &mut away).commit(&good).unwrap();
        assert_eq!(home.player(PlayerId(1)).unwrap().morale, 90);
        assert_eq!(away.player(PlayerId(105)).unwrap().morale, 10);
    }

    struct FailingStore;

    impl MoraleStore for FailingStore {
        fn commit(&mut self, _: &[MoraleUpdate]) -> Result<(), MoraleCommitError> {
            Err(MoraleCommitError::Store("connection lost".into()))
        }
    }

    #[test]
    fn test_commit_failure_is_logged_and_result_kept() {
        let mut config = EngineConfig::default();
        config.morale.enabled = true;
        let home = squad("Home", 0);
        let away = squad("Away", 100);
        let options = crate::engine::match_sim::MatchOptions::default().with_seed(11);
        let mut result = crate::engine::match_sim::MatchEngine::new(&home, &away, &options, &config)
            .unwrap()
            .simulate();
        let before = result.clone();

        assert!(result.commit_morale(&mut FailingStore).is_err());
        let last = result.events.last().unwrap();
        assert_eq!(last.importance, Importance::Error);
        assert!(matches!(last.kind, EventKind::MoraleCommitFailed { .. }));
        assert_eq!(result.score_home, before.score_home);
        assert_eq!(result.morale_updates, before.morale_updates);
        assert_eq!(result.events.len(), before.events.len() + 1);
    }

    #[test]
    fn test_disabled_morale_computes_nothing() {
        let config = EngineConfig::default();
        let mut home = squad("Home", 0);
        let mut away = squad("Away", 100);
        let options = crate::engine::match_sim::MatchOptions::default().with_seed(2);
        let mut result = crate::engine::match_sim::MatchEngine::new(&home, &away, &options, &config)
            .unwrap()
            .simulate();
        assert!(result.morale_updates.is_none());
        assert!(!result.events.iter().any(|e| matches!(e.kind, EventKind::MoraleChange { .. })));
        assert_eq!(result.commit_morale(&mut RosterMoraleStore::new(&mut home, &mut away)), Ok(0));
    }

    proptest! {
        #[test]
        fn prop_new_morale_is_clamped(
            morale in 0u8..=100,
            outcome in -40.0f32..40.0,
            performance in 0.0f32..20.0,
            drift in -5.0f32..5.0,
        ) {
            let player = Player::new(1, "P", crate::models::Position::Forward, 60, 100).with_morale(morale);
            let update = morale_update(&player, Side::Home, true, outcome, performance, drift);
            prop_assert!(update.new_morale <= 100);
            prop_assert_eq!(update.old_morale, morale);
        }
    }
}
