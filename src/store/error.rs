//! Error types raised by result stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("result store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted record on line {line}: {reason}")]
    CorruptedRecord { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
