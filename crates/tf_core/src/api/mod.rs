pub mod json_api;

pub use json_api::{
    match_request_schema, match_result_schema, odds_request_schema, prematch_odds_json,
    simulate_match_json, MatchRequest, MatchResponse, OddsJsonRequest,
};
