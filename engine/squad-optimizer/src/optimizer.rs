use crossbeam::channel::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::backend::{BackendError, MicroLpBackend, SolverBackend};
use crate::config::OptimizerConfig;
use crate::diagnostics::find_infeasibility;
use crate::error::{Result, SelectionError};
use crate::pool::CandidatePool;
use crate::program::SquadProgram;
use crate::selection::SelectionResult;

/// Builds the squad program for a pool, solves it and validates the result
pub struct SquadOptimizer {
    backend: Arc<dyn SolverBackend>,
}

impl SquadOptimizer {
    /// Create an optimizer using the microlp backend
    pub fn new() -> Self {
        Self::with_backend(Arc::new(MicroLpBackend))
    }

    /// Create an optimizer with a custom backend
    pub fn with_backend(backend: Arc<dyn SolverBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Select the optimal starting XI, captain and bench from a pool
    pub fn solve(&self, pool: &CandidatePool, config: &OptimizerConfig) -> Result<SelectionResult> {
        config.validate()?;

        if pool.len() < config.squad_size {
            return Err(SelectionError::EmptyPool { eligible: pool.len(), required: config.squad_size });
        }

        if let Some(err) = find_infeasibility(pool, config) {
            warn!("Selection rejected before solving: {}", err);
            return Err(err);
        }

        let program = Arc::new(SquadProgram::build(pool, config));
        info!(
            "Solving squad program with {} backend: {} candidates, {} constraints",
            self.backend.name(),
            pool.len(),
            program.constraints().len()
        );

        let started = Instant::now();
        let assignment = self.run_backend(Arc::clone(&program), config.max_solve_time())?;
        debug!("Backend returned after {:?}", started.elapsed());

        let selection = SelectionResult::extract(pool, &program, &assignment, config)?;
        info!(
            "Selected squad: objective {:.2}, spend {:.1} of {:.1}, captain index {}",
            selection.objective_value(),
            selection.total_price_tenths(pool) as f64 / 10.0,
            config.total_budget,
            selection.captain()
        );
        Ok(selection)
    }

    fn run_backend(&self, program: Arc<SquadProgram>, limit: Option<Duration>) -> Result<Vec<f64>> {
        let outcome = match limit {
            None => self.backend.solve(&program),
            Some(limit) => {
                let (tx, rx) = channel::bounded(1);
                let backend = Arc::clone(&self.backend);
                // The solve cannot be cancelled; a timed-out worker runs to completion
                // in the background and reports when its result is dropped.
                thread::Builder::new()
                    .name("squad-solver".to_string())
                    .spawn(move || {
                        let started = Instant::now();
                        let outcome = backend.solve(&program);
                        if tx.send(outcome).is_err() {
                            warn!(
                                "Detached {} solve finished after {:?}; caller had timed out, result dropped",
                                backend.name(),
                                started.elapsed()
                            );
                        }
                    })
                    .map_err(|e| SelectionError::solver(format!("failed to start solver thread: {e}")))?;

                match rx.recv_timeout(limit) {
                    Ok(outcome) => outcome,
                    Err(RecvTimeoutError::Timeout) => {
                        warn!("Solver exceeded {:?}; discarding its result", limit);
                        return Err(SelectionError::SolverTimeout { limit });
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err(SelectionError::solver("solver thread terminated without a result"));
                    }
                }
            }
        };

        outcome.map_err(|err| match err {
            BackendError::Infeasible => {
                SelectionError::infeasible_unknown("solver proved the constraints unsatisfiable")
            }
            BackendError::Unbounded => SelectionError::solver("binary program reported unbounded"),
            BackendError::Failure(msg) => SelectionError::solver(msg),
        })
    }
}

impl Default for SquadOptimizer {
    fn default() -> Self {
        Self::new()
    }
}
