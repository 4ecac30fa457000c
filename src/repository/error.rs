//! Error types raised by fighter repositories.

use thiserror::Error;

use crate::data::RulesetError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("fighter repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no fighter with login '{0}'")]
    FighterNotFound(String),

    #[error("no game data available")]
    NoGameData,

    #[error("invalid game data: {0}")]
    InvalidRuleset(#[from] RulesetError),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
