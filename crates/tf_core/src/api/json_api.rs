//! JSON entry points for hosts that only speak strings (web layer, scripts).
//!
//! Every request carries a `schema_version`; the current version is
//! [`crate::SCHEMA_VERSION`]. An omitted `config` runs the default engine
//! configuration, a partial one overrides only the fields it names.

use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::engine::match_sim::{MatchEngine, MatchOptions};
use crate::engine::odds::{get_prematch_odds_with, OddsRequest};
use crate::error::{MatchError, Result};
use crate::models::{MatchResult, Roster};
use crate::narration::NarratedEvent;
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub home: Roster,
    pub away: Roster,
    #[serde(default)]
    pub options: MatchOptions,
    #[serde(default)]
    pub config: Option<EngineConfig>,
    /// Attach the rendered commentary to the response.
    #[serde(default)]
    pub narrate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub result: MatchResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<Vec<NarratedEvent>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OddsJsonRequest {
    pub schema_version: u8,
    pub user: Roster,
    pub enemy: Roster,
    #[serde(default)]
    pub odds: OddsRequest,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

fn check_version(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(MatchError::UnsupportedSchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

/// Simulates one match described by a [`MatchRequest`] and returns a
/// [`MatchResponse`] as JSON.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    check_version(request.schema_version)?;

    let config = request.config.unwrap_or_default();
    let result = MatchEngine::new(&request.home, &request.away, &request.options, &config)?.simulate();
    let narration = request.narrate.then(|| result.narrated_log());

    let response = MatchResponse { schema_version: SCHEMA_VERSION, result, narration };
    Ok(serde_json::to_string(&response)?)
}

/// Runs the odds estimator for an [`OddsJsonRequest`] and returns the
/// [`crate::models::OddsSummary`] as JSON.
pub fn prematch_odds_json(request_json: &str) -> Result<String> {
    let request: OddsJsonRequest = serde_json::from_str(request_json)?;
    check_version(request.schema_version)?;

    if request.odds.runs == Some(0) {
        return Err(MatchError::InvalidRequest("odds.runs must be positive".to_string()));
    }

    let config = request.config.unwrap_or_default();
    let summary = get_prematch_odds_with(&request.user, &request.enemy, &request.odds, &config)?;
    Ok(serde_json::to_string(&summary)?)
}

pub fn match_request_schema() -> RootSchema {
    schema_for!(MatchRequest)
}

pub fn match_result_schema() -> RootSchema {
    schema_for!(MatchResponse)
}

pub fn odds_request_schema() -> RootSchema {
    schema_for!(OddsJsonRequest)
}
