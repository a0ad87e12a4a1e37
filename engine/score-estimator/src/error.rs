//! Error types for estimator configuration

use thiserror::Error;

/// Result type alias for estimator operations
pub type Result<T> = std::result::Result<T, EstimatorError>;

/// Configuration problems detected before scoring
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("Invalid estimator configuration: {0}")]
    InvalidConfig(String),
}

impl EstimatorError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
