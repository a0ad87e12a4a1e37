//! Error types for squad selection

use std::time::Duration;
use thiserror::Error;

/// Result type alias for selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Errors that can occur while building or solving a selection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Too few candidates survived filtering to fill a squad
    #[error("Candidate pool has {eligible} eligible players, {required} required")]
    EmptyPool { eligible: usize, required: usize },

    /// The constraints cannot be met by this pool and configuration
    #[error("Infeasible selection{}: {detail}", constraint_suffix(.constraint))]
    InfeasibleSelection { constraint: Option<String>, detail: String },

    /// The solver did not return within the configured bound
    #[error("Solver did not finish within {limit:?}")]
    SolverTimeout { limit: Duration },

    /// Post-solve validation failed; indicates an integration bug
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    /// The optimizer configuration is incoherent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The solver failed for a reason other than infeasibility
    #[error("Solver error: {0}")]
    Solver(String),
}

fn constraint_suffix(constraint: &Option<String>) -> String {
    constraint.as_ref().map(|c| format!(" ({c})")).unwrap_or_default()
}

impl SelectionError {
    /// Create an infeasibility error naming the constraint at fault
    pub fn infeasible(constraint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InfeasibleSelection { constraint: Some(constraint.into()), detail: detail.into() }
    }

    /// Create an infeasibility error without a determinable cause
    pub fn infeasible_unknown(detail: impl Into<String>) -> Self {
        Self::InfeasibleSelection { constraint: None, detail: detail.into() }
    }

    /// Create a new internal consistency error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalConsistency(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new solver error
    pub fn solver(msg: impl Into<String>) -> Self {
        Self::Solver(msg.into())
    }
}
