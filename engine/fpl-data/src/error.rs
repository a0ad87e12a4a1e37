//! Error types for snapshot loading

use thiserror::Error;

use crate::types::PlayerId;

/// Result type alias for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or validating snapshot data
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O errors reading the snapshot file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or a record that does not match the schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two player records share the same identifier
    #[error("Duplicate player id: {0}")]
    DuplicatePlayer(PlayerId),

    /// Upstream element type outside 1..=4
    #[error("Unknown element type: {0}")]
    UnknownElementType(u8),

    /// A record with out-of-range values
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl DataError {
    /// Create a new invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }
}
