//! # SquadOptimizer
//!
//! Selects a starting XI, a captain and a bench from a scored candidate pool by
//! solving a 0/1 integer program under budget, position, club and
//! differential constraints.
//!
//! The pipeline inside this crate is:
//!
//! 1. [`CandidatePool::build`] filters scored players and fixes the index space.
//! 2. [`SquadProgram::build`] turns the pool and an [`OptimizerConfig`] into a
//!    plain-data linear program.
//! 3. A [`SolverBackend`] (by default [`MicroLpBackend`]) solves it.
//! 4. [`SelectionResult::extract`] reads the assignment back and re-validates
//!    every constraint against the concrete squad.

pub mod backend;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod optimizer;
pub mod pool;
pub mod program;
pub mod selection;

pub use backend::{BackendError, MicroLpBackend, SolverBackend};
pub use config::{
    DifferentialQuota, DifferentialScope, OptimizerConfig, PositionQuota, PositionQuotas,
};
pub use error::{Result, SelectionError};
pub use optimizer::SquadOptimizer;
pub use pool::{CandidatePool, PoolFilter};
pub use program::{LinearConstraint, Role, Sense, SquadProgram};
pub use selection::{SelectionResult, SquadRole};

/// Re-export commonly used types
pub use fpl_data::{PlayerRecord, Position, TeamId};
pub use score_estimator::ScoredPlayer;

/// Tolerance when reading binary values back from the solver
pub const INTEGRALITY_TOLERANCE: f64 = 1e-5;
