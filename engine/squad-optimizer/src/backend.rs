//! Integer programming backends

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use thiserror::Error;

use crate::program::{Sense, SquadProgram};

/// Non-optimal outcomes reported by a backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("model is infeasible")]
    Infeasible,

    #[error("model is unbounded")]
    Unbounded,

    #[error("{0}")]
    Failure(String),
}

/// Solves a [`SquadProgram`] with every column restricted to {0, 1}
pub trait SolverBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Optimal column values, one per program column
    fn solve(&self, program: &SquadProgram) -> Result<Vec<f64>, BackendError>;
}

/// Pure-Rust branch-and-bound backend via `good_lp`'s microlp solver
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpBackend;

impl SolverBackend for MicroLpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, program: &SquadProgram) -> Result<Vec<f64>, BackendError> {
        let mut vars = ProblemVariables::new();
        let columns: Vec<Variable> =
            (0..program.column_count()).map(|_| vars.add(variable().binary())).collect();

        let objective: Expression =
            program.objective().iter().zip(&columns).map(|(&coeff, &column)| coeff * column).sum();

        let mut model = vars.maximise(objective).using(microlp);
        for linear in program.constraints() {
            let lhs: Expression =
                linear.terms.iter().map(|&(column, coeff)| coeff * columns[column]).sum();
            let rhs = linear.rhs;
            model = model.with(match linear.sense {
                Sense::Le => constraint!(lhs <= rhs),
                Sense::Ge => constraint!(lhs >= rhs),
                Sense::Eq => constraint!(lhs == rhs),
            });
        }

        let solution = model.solve().map_err(|err| match err {
            ResolutionError::Infeasible => BackendError::Infeasible,
            ResolutionError::Unbounded => BackendError::Unbounded,
            other => BackendError::Failure(other.to_string()),
        })?;

        Ok(columns.iter().map(|&column| solution.value(column)).collect())
    }
}
