pub mod config;
pub mod lineup;
pub mod match_sim;
pub mod morale; // post-match morale, computed only; commits go through MoraleStore
pub mod odds;
pub mod probability;
pub mod ratings;
pub mod zonal;

pub use config::EngineConfig;
pub use lineup::{Lineup, LineupSelector, TeamAverages};
pub use match_sim::{MatchEngine, MatchOptions, Venue};
pub use morale::{MoraleStore, RosterMoraleStore};
pub use odds::{get_prematch_odds, get_prematch_odds_with, OddsRequest};
pub use ratings::{RatingModel, RatingModifier};
pub use zonal::ZonalStrength;
