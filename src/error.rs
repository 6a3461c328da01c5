//! Error types shared across the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the word store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Word not found: {0}")]
    NotFound(i64),

    #[error("Word {id} does not belong to '{owner}'")]
    NotOwned { id: i64, owner: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A quality rating outside Hard (1), Neutral (3) and Easy (5).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Invalid quality rating {0}: expected 1 (hard), 3 (neutral) or 5 (easy)")]
pub struct InvalidQuality(pub u8);

/// Failures surfaced by a review session to its caller.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not persist review: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidQuality(#[from] InvalidQuality),

    #[error("Review session is already complete")]
    Finished,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid vocabulary file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}
