//! # tf_core - Stochastic Football Match Simulation Engine
//!
//! Minute-by-minute match engine for a text-based football manager:
//! lineup selection, zonal strength, midfield/attack/shot resolution,
//! scheduled free kicks, penalties, shootouts, post-match morale and a
//! Monte-Carlo pre-match odds estimator.
//!
//! ## Features
//! - Seeded runs are reproducible (same seed and inputs = same result)
//! - Structured event log with a separate narration layer
//! - One [`EngineConfig`] carries every tuning constant
//! - JSON API with published JSON Schemas

// Game engine APIs often require many parameters for state, config, rng.
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Large enum variants - boxing would require API changes
#![allow(clippy::large_enum_variant)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod narration;

use tracing::warn;

pub use api::{
    prematch_odds_json, simulate_match_json, MatchRequest, MatchResponse, OddsJsonRequest,
};
pub use engine::{
    get_prematch_odds, get_prematch_odds_with, EngineConfig, MatchEngine, MatchOptions,
    MoraleStore, OddsRequest, RosterMoraleStore, Venue,
};
pub use error::{MatchError, MoraleCommitError, Result};
pub use models::{
    EventKind, MatchEvent, MatchResult, OddsSummary, Personality, Player, PlayerId, Position,
    Roster, Side,
};
pub use narration::NarratedEvent;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

/// Plays one match with the default configuration and a fresh seed.
pub fn simulate_match(home: &Roster, away: &Roster, knockout: bool) -> MatchResult {
    let config = EngineConfig::default();
    let options = MatchOptions { knockout, ..MatchOptions::default() };
    MatchEngine::prepare(home, away, &options, &config).simulate()
}

pub fn simulate_match_with(
    home: &Roster,
    away: &Roster,
    options: &MatchOptions,
    config: &EngineConfig,
) -> Result<MatchResult> {
    Ok(MatchEngine::new(home, away, options, config)?.simulate())
}

/// Plays a match and writes the resulting morale back into both rosters.
///
/// A failed commit is logged and recorded as a `MORALE_COMMIT_FAILED` event;
/// the score and the rest of the result are unaffected.
pub fn simulate_and_commit(
    home: &mut Roster,
    away: &mut Roster,
    options: &MatchOptions,
    config: &EngineConfig,
) -> Result<MatchResult> {
    let mut result = simulate_match_with(home, away, options, config)?;

    let mut store = RosterMoraleStore::new(home, away);
    if let Err(err) = result.commit_morale(&mut store) {
        warn!(%err, "match result kept without morale changes");
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::*;

    #[test]
    fn test_simulate_match_default_config() {
        let home = squad("Home", 0);
        let away = squad("Away", 100);

        let result = simulate_match(&home, &away, true);
        assert!(!result.abandoned);
        assert!(result.winner().is_some(), "knockout must produce a winner");
        assert_eq!(result.events.first().map(|e| e.event_type()), Some("KICKOFF"));
    }

    #[test]
    fn test_simulate_match_with_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.flow.home_advantage = 0.0;
        let err = simulate_match_with(&squad("A", 0), &squad("B", 100), &MatchOptions::default(), &config)
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    #[test]
    fn test_simulate_and_commit_updates_rosters() {
        let mut home = squad("Home", 0);
        let mut away = squad("Away", 100);
        let mut config = EngineConfig::default();
        config.morale.enabled = true;
        let options = MatchOptions::default().with_seed(2024);

        let result = simulate_and_commit(&mut home, &mut away, &options, &config).unwrap();
        let updates = result.morale_updates.as_ref().unwrap();
        assert!(!updates.is_empty());
        assert_eq!(result.events.last().map(|e| e.event_type()), Some("MORALE_COMMIT"));

        for update in updates {
            let player = home
                .players
                .iter()
                .chain(away.players.iter())
                .find(|p| p.id == update.player_id)
                .unwrap();
            assert_eq!(player.morale, update.new_morale);
        }
    }

    #[test]
    fn test_headless_match_still_commits_morale() {
        let mut home = squad("Home", 0);
        let mut away = squad("Away", 100);
        let mut config = EngineConfig::default();
        config.morale.enabled = true;
        let options = MatchOptions::default().with_seed(2024).headless();

        let result = simulate_and_commit(&mut home, &mut away, &options, &config).unwrap();
        let updates = result.morale_updates.as_ref().unwrap();
        assert_eq!(updates.len(), home.players.len() + away.players.len());
        for update in updates {
            let roster = if update.side == Side::Home { &home } else { &away };
            assert_eq!(roster.player(update.player_id).map(|p| p.morale), Some(update.new_morale));
        }
        assert!(updates.iter().any(|u| u.delta != 0));
    }

    #[test]
    fn test_without_morale_skips_updates() {
        let mut config = EngineConfig::default();
        config.morale.enabled = true;
        let options = MatchOptions::default().with_seed(2024).without_morale();
        let result = simulate_match_with(&squad("Home", 0), &squad("Away", 100), &options, &config).unwrap();
        assert!(result.morale_updates.is_none());
        assert!(!result.events.is_empty());
    }

    #[test]
    fn test_disabled_morale_leaves_rosters_untouched() {
        let mut home = squad("Home", 0);
        let mut away = squad("Away", 100);
        let before = home.clone();
        let mut config = EngineConfig::default();
        config.morale.enabled = false;

        let result =
            simulate_and_commit(&mut home, &mut away, &MatchOptions::default().with_seed(1), &config).unwrap();
        assert!(result.morale_updates.is_none());
        assert_eq!(home, before);
    }
}
