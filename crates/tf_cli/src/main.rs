//! Text Football CLI
//!
//! 경기 시뮬레이션 / 승률 예측 / 스키마 출력

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tf")]
#[command(about = "Simulate text football matches and pre-match odds", long_about = None)]
struct Cli {
    /// Engine config JSON; omitted fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Play one match between two roster files
    Simulate {
        /// Home roster JSON file
        #[arg(long)]
        home: PathBuf,

        /// Away roster JSON file
        #[arg(long)]
        away: PathBuf,

        /// Knockout tie: level scores go to a shootout
        #[arg(long, default_value = "false")]
        knockout: bool,

        /// Neutral ground (no home advantage)
        #[arg(long, default_value = "false")]
        neutral: bool,

        #[arg(long)]
        seed: Option<u64>,

        /// Print the full result and narration as JSON
        #[arg(long, default_value = "false")]
        json: bool,

        /// Only print goals, chances and set pieces
        #[arg(long, default_value = "false")]
        highlights: bool,

        /// Write computed morale back into the roster files
        #[arg(long, default_value = "false")]
        commit_morale: bool,
    },

    /// Estimate win/draw/loss odds for both home and away fixtures
    Odds {
        /// User roster JSON file
        #[arg(long)]
        user: PathBuf,

        /// Opponent roster JSON file
        #[arg(long)]
        enemy: PathBuf,

        /// Runs per fixture
        #[arg(long)]
        runs: Option<u32>,

        #[arg(long)]
        seed: Option<u64>,

        /// Run on a single thread
        #[arg(long, default_value = "false")]
        sequential: bool,

        /// Stop early after this many milliseconds
        #[arg(long)]
        budget_ms: Option<u64>,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the JSON Schemas of the request/response documents
    Schema,
}

#[cfg(feature = "cli")]
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use tf_cli::{load_config, load_roster, render_commentary, render_odds, schema_bundle};
    use tf_core::{MatchOptions, OddsRequest, Venue};

    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate { home, away, knockout, neutral, seed, json, highlights, commit_morale } => {
            let mut home_roster = load_roster(&home)?;
            let mut away_roster = load_roster(&away)?;

            let options = MatchOptions {
                knockout,
                venue: if neutral { Venue::Neutral } else { Venue::HomeAdvantage },
                seed,
                ..MatchOptions::default()
            };

            let result = if commit_morale {
                let result =
                    tf_core::simulate_and_commit(&mut home_roster, &mut away_roster, &options, &config)?;
                save_roster(&home, &home_roster)?;
                save_roster(&away, &away_roster)?;
                result
            } else {
                tf_core::simulate_match_with(&home_roster, &away_roster, &options, &config)?
            };
            tracing::info!(seed = result.seed, "match finished");

            if json {
                let output = serde_json::json!({
                    "schema_version": tf_core::SCHEMA_VERSION,
                    "result": &result,
                    "narration": result.narrated_log(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", render_commentary(&result, highlights));
            }
        }

        Commands::Odds { user, enemy, runs, seed, sequential, budget_ms, json } => {
            let user_roster = load_roster(&user)?;
            let enemy_roster = load_roster(&enemy)?;

            let request = OddsRequest {
                runs,
                seed,
                parallel: !sequential,
                time_budget_ms: budget_ms,
                ..OddsRequest::default()
            };
            let summary = tf_core::get_prematch_odds_with(&user_roster, &enemy_roster, &request, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_odds(&summary));
            }
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&schema_bundle()?)?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn save_roster(path: &PathBuf, roster: &tf_core::Roster) -> Result<()> {
    let json = serde_json::to_string_pretty(roster)?;
    std::fs::write(path, json).with_context(|| format!("failed to write roster {}", path.display()))?;
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tf CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
