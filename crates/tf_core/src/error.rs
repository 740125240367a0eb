use thiserror::Error;

use crate::models::PlayerId;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchemaVersion { found: u8, expected: u8 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while applying computed morale updates to player records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoraleCommitError {
    #[error("Player {0} not found in any committed roster")]
    UnknownPlayer(PlayerId),

    #[error("Morale store unavailable: {0}")]
    Store(String),
}

impl MoraleCommitError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            MoraleCommitError::UnknownPlayer(_) => false,
            MoraleCommitError::Store(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
