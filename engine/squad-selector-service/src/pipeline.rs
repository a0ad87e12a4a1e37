//! Snapshot to squad, one stage at a time

use fpl_data::Snapshot;
use score_estimator::{EstimatorConfig, ScoreEstimator, ScoredPlayer};
use squad_optimizer::{CandidatePool, SelectionResult, SquadOptimizer};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::report::SquadReport;

/// Composes scoring, pool filtering, optimization and reporting
pub struct SelectionPipeline {
    config: ServiceConfig,
    optimizer: SquadOptimizer,
}

impl SelectionPipeline {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_optimizer(config, SquadOptimizer::new())
    }

    /// Pipeline with a custom optimizer, e.g. a different solver backend
    pub fn with_optimizer(config: ServiceConfig, optimizer: SquadOptimizer) -> Self {
        Self { config, optimizer }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Gameweek the run is anchored at
    pub fn gameweek_for(&self, snapshot: &Snapshot) -> u32 {
        self.config.input.gameweek.unwrap_or(snapshot.current_gameweek)
    }

    /// Load the configured snapshot file and run every stage
    pub fn run_from_file(&self, path: &Path) -> Result<SquadReport> {
        let snapshot = Snapshot::from_file(path)?;
        self.run(&snapshot)
    }

    /// Run every stage over an in-memory snapshot
    pub fn run(&self, snapshot: &Snapshot) -> Result<SquadReport> {
        let started = Instant::now();
        let gameweek = self.gameweek_for(snapshot);

        let scored = self.score(snapshot, gameweek);
        let pool = self.candidate_pool(scored)?;
        let selection = self.select(&pool)?;
        let report = SquadReport::from_selection(gameweek, &pool, &selection, &self.config.optimizer)?;

        info!(
            "Pipeline finished in {:?}: gameweek {}, captain {}, spend {:.1}",
            started.elapsed(),
            gameweek,
            report.captain.name,
            report.total_price
        );
        Ok(report)
    }

    /// Project a score for every player in the snapshot
    pub fn score(&self, snapshot: &Snapshot, gameweek: u32) -> Vec<ScoredPlayer> {
        let config = EstimatorConfig { current_gameweek: gameweek, ..self.config.estimator.clone() };
        let fixtures = snapshot.fixture_table();
        if fixtures.is_empty() {
            warn!("Snapshot has no fixtures; density-weighted projections will be zero");
        } else {
            debug!("Fixture table covers {} clubs", fixtures.team_count());
        }
        ScoreEstimator::new(config).score_all(&snapshot.players, &fixtures)
    }

    /// Filter scored players into the optimizer's index space
    pub fn candidate_pool(&self, scored: Vec<ScoredPlayer>) -> Result<CandidatePool> {
        Ok(CandidatePool::build(scored, &self.config.pool, self.config.optimizer.squad_size)?)
    }

    pub fn select(&self, pool: &CandidatePool) -> Result<SelectionResult> {
        info!("Selecting from {} candidates with {} backend", pool.len(), self.optimizer.backend_name());
        Ok(self.optimizer.solve(pool, &self.config.optimizer)?)
    }
}
