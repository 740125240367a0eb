//! Text football CLI helpers
//!
//! 로스터 JSON 파일 로딩 및 결과 렌더링 (file loading and rendering shared
//! by the `tf` binary and its tests).

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tf_core::api::{match_request_schema, match_result_schema, odds_request_schema};
use tf_core::models::{FixtureOdds, Importance, OddsSummary};
use tf_core::{EngineConfig, MatchResult, Roster};

/// Reads a roster from a JSON file.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    let roster: Roster = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse roster {}", path.display()))?;
    if roster.players.is_empty() {
        anyhow::bail!("roster {} has no players", path.display());
    }
    Ok(roster)
}

/// Reads an engine config; fields missing from the file keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate().with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Commentary view of a finished match, one line per event.
///
/// With `highlights_only`, plain ball-progress lines are skipped.
pub fn render_commentary(result: &MatchResult, highlights_only: bool) -> String {
    let mut out = String::new();
    for line in result.narrated_log() {
        if highlights_only && line.importance == Importance::Normal {
            continue;
        }
        out.push_str(&format!("{:>3}' {}", line.minute, line.message));
        if let Some(details) = &line.details {
            out.push_str(&format!("  [{}]", details));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{} {} - {} {}\n",
        result.home.name, result.score_home, result.score_away, result.away.name
    ));
    if let Some(shootout) = &result.shootout {
        let lot = if shootout.decided_by_lot { " (decided by lot)" } else { "" };
        out.push_str(&format!("Penalties: {} - {}{}\n", shootout.home_goals, shootout.away_goals, lot));
    }
    out
}

fn render_fixture(out: &mut String, label: &str, fixture: &FixtureOdds) {
    let o = &fixture.outcome;
    out.push_str(&format!(
        "{label:<6} {:>5} runs  W {:>5.1}%  D {:>5.1}%  L {:>5.1}%  goals {:.2} - {:.2}\n",
        o.runs, o.win_pct, o.draw_pct, o.loss_pct, o.avg_goals_for, o.avg_goals_against
    ));
}

/// Compact table of both orientations.
pub fn render_odds(summary: &OddsSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} vs {} ({} runs requested per fixture)\n",
        summary.home_fixture.user.name, summary.home_fixture.enemy.name, summary.runs_requested
    ));
    render_fixture(&mut out, "home", &summary.home_fixture);
    render_fixture(&mut out, "away", &summary.away_fixture);
    out
}

/// All published schemas in one document.
pub fn schema_bundle() -> Result<serde_json::Value> {
    Ok(json!({
        "schema_version": tf_core::SCHEMA_VERSION,
        "match_request": serde_json::to_value(match_request_schema())?,
        "match_response": serde_json::to_value(match_result_schema())?,
        "odds_request": serde_json::to_value(odds_request_schema())?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tf_core::{MatchEngine, MatchOptions, Player, Position};

    fn roster(name: &str, id_base: u32) -> Roster {
        let positions = [
            Position::Goalkeeper,
            Position::Defender,
            Position::Defender,
            Position::Defender,
            Position::Defender,
            Position::Midfielder,
            Position::Midfielder,
            Position::Midfielder,
            Position::Midfielder,
            Position::Forward,
            Position::Forward,
        ];
        let players = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Player::new(id_base + i as u32 + 1, format!("{name} {i}"), pos, 65, 100))
            .collect();
        Roster::new(name, players)
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_roster_from_file() {
        let file = write_temp(&serde_json::to_string(&roster("Lions", 0)).unwrap());
        let loaded = load_roster(file.path()).unwrap();
        assert_eq!(loaded.name, "Lions");
        assert_eq!(loaded.players.len(), 11);
    }

    #[test]
    fn test_load_roster_reports_path_on_parse_error() {
        let file = write_temp("{ \"name\": ");
        let err = load_roster(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse roster"));
    }

    #[test]
    fn test_load_roster_rejects_empty_squad() {
        let file = write_temp(r#"{ "name": "Nobody", "players": [] }"#);
        assert!(load_roster(file.path()).is_err());
    }

    #[test]
    fn test_load_config_partial_file() {
        let file = write_temp(r#"{ "flow": { "home_advantage": 1.1 } }"#);
        let config = load_config(Some(file.path())).unwrap();
        assert!((config.flow.home_advantage - 1.1).abs() < 1e-6);
        assert!((config.flow.midfield_scaling - EngineConfig::default().flow.midfield_scaling).abs() < 1e-6);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let file = write_temp(r#"{ "flow": { "home_advantage": -2.0 } }"#);
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn test_render_commentary_ends_with_score() {
        let home = roster("Lions", 0);
        let away = roster("Tigers", 100);
        let config = EngineConfig::default();
        let result = MatchEngine::new(&home, &away, &MatchOptions::default().with_seed(9), &config)
            .unwrap()
            .simulate();

        let full = render_commentary(&result, false);
        let highlights = render_commentary(&result, true);
        assert!(full.contains("Kickoff!"));
        assert!(full.contains(&format!("Lions {} - {} Tigers", result.score_home, result.score_away)));
        assert!(highlights.lines().count() <= full.lines().count());
    }

    #[test]
    fn test_render_odds_has_both_fixtures() {
        let user = roster("Lions", 0);
        let enemy = roster("Tigers", 100);
        let request = tf_core::OddsRequest::default().with_runs(10).with_seed(4);
        let summary = tf_core::get_prematch_odds(&user, &enemy, &request);

        let text = render_odds(&summary);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Lions vs Tigers (10 runs requested per fixture)");
        assert!(lines[1].starts_with("home") && lines[1].contains("10 runs"));
        assert!(lines[2].starts_with("away"));
    }

    #[test]
    fn test_schema_bundle_has_all_documents() {
        let bundle = schema_bundle().unwrap();
        assert_eq!(bundle["schema_version"], 1);
        for key in ["match_request", "match_response", "odds_request"] {
            assert!(bundle[key].is_object(), "{key} missing");
        }
    }
}
