//! Structured output of a selection run

use chrono::{DateTime, Utc};
use fpl_data::{PlayerId, Position, TeamId};
use score_estimator::ScoredPlayer;
use serde::{Deserialize, Serialize};
use squad_optimizer::{CandidatePool, OptimizerConfig, SelectionError, SelectionResult};

/// One selected player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
    pub position: Position,
    /// Price in whole currency units
    pub price: f64,
    pub projected_score: f64,
}

/// Chosen squad by role, ready for an external reporting collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadReport {
    pub generated_at: DateTime<Utc>,
    pub gameweek: u32,
    pub starters: Vec<ReportEntry>,
    pub captain: ReportEntry,
    pub bench: Vec<ReportEntry>,
    pub total_price: f64,
    pub budget: f64,
    pub objective_value: f64,
}

impl ReportEntry {
    pub fn from_scored(player: &ScoredPlayer) -> Self {
        Self {
            id: player.record.id,
            name: player.record.name.clone(),
            team_id: player.record.team_id,
            position: player.record.position,
            price: player.record.price(),
            projected_score: player.projected_score,
        }
    }
}

impl SquadReport {
    /// Resolve a selection against the pool that produced it
    pub fn from_selection(
        gameweek: u32,
        pool: &CandidatePool,
        selection: &SelectionResult,
        config: &OptimizerConfig,
    ) -> Result<Self, SelectionError> {
        let entry = |index: usize| {
            pool.get(index).map(ReportEntry::from_scored).ok_or_else(|| {
                SelectionError::internal(format!("selected index {index} is outside a pool of {}", pool.len()))
            })
        };

        let starters = selection.starters().into_iter().map(entry).collect::<Result<Vec<_>, _>>()?;
        let bench = selection.bench().into_iter().map(entry).collect::<Result<Vec<_>, _>>()?;
        let captain = entry(selection.captain())?;

        Ok(Self {
            generated_at: Utc::now(),
            gameweek,
            starters,
            captain,
            bench,
            total_price: selection.total_price_tenths(pool) as f64 / 10.0,
            budget: config.total_budget,
            objective_value: selection.objective_value(),
        })
    }

    /// Squad members in starter-then-bench order
    pub fn squad(&self) -> impl Iterator<Item = &ReportEntry> {
        self.starters.iter().chain(&self.bench)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
