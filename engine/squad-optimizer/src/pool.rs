use fpl_data::{PlayerRecord, Position, TeamId};
use score_estimator::ScoredPlayer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::error::{Result, SelectionError};

/// Eligibility thresholds applied before optimization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolFilter {
    /// Players must have played strictly more minutes than this
    pub min_minutes: u32,

    /// Players must have a known availability strictly above this
    pub min_availability_pct: f64,
}

impl Default for PoolFilter {
    fn default() -> Self {
        Self { min_minutes: 500, min_availability_pct: 50.0 }
    }
}

impl PoolFilter {
    /// Whether a player passes the minutes and availability thresholds
    pub fn accepts(&self, player: &PlayerRecord) -> bool {
        player.minutes > self.min_minutes
            && player.availability_pct.is_some_and(|pct| pct > self.min_availability_pct)
    }
}

/// Filtered, index-stable candidates for one optimization run.
///
/// The position of a player in the pool is its identity for the optimizer's
/// decision variables and for [`crate::SelectionResult`].
#[derive(Debug, Clone)]
pub struct CandidatePool {
    entries: Vec<ScoredPlayer>,
}

impl CandidatePool {
    /// Filter scored players, preserving input order.
    ///
    /// Fails with [`SelectionError::EmptyPool`] when fewer than `required`
    /// players survive.
    pub fn build(scored: Vec<ScoredPlayer>, filter: &PoolFilter, required: usize) -> Result<Self> {
        let total = scored.len();
        let unknown_availability =
            scored.iter().filter(|p| p.record.availability_pct.is_none()).count();

        let entries: Vec<ScoredPlayer> =
            scored.into_iter().filter(|p| filter.accepts(&p.record)).collect();

        if unknown_availability > 0 {
            warn!("Dropped {} players with unknown availability", unknown_availability);
        }
        info!(
            "Candidate pool: {} of {} players eligible (minutes > {}, availability > {}%)",
            entries.len(),
            total,
            filter.min_minutes,
            filter.min_availability_pct
        );

        if entries.len() < required {
            return Err(SelectionError::EmptyPool { eligible: entries.len(), required });
        }
        Ok(Self { entries })
    }

    /// Wrap already-filtered players without applying thresholds
    pub fn from_scored(entries: Vec<ScoredPlayer>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScoredPlayer> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredPlayer> {
        self.entries.iter()
    }

    /// Projected scores, index-aligned
    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|p| p.projected_score).collect()
    }

    /// Prices in tenths, index-aligned
    pub fn prices_tenths(&self) -> Vec<u32> {
        self.entries.iter().map(|p| p.record.price_tenths).collect()
    }

    /// Positions, index-aligned
    pub fn positions(&self) -> Vec<Position> {
        self.entries.iter().map(|p| p.record.position).collect()
    }

    /// Clubs, index-aligned
    pub fn clubs(&self) -> Vec<TeamId> {
        self.entries.iter().map(|p| p.record.team_id).collect()
    }

    /// Ownership percentages, index-aligned
    pub fn ownership(&self) -> Vec<f64> {
        self.entries.iter().map(|p| p.record.ownership_pct).collect()
    }

    /// Clubs present in the pool, ascending
    pub fn distinct_clubs(&self) -> BTreeSet<TeamId> {
        self.entries.iter().map(|p| p.record.team_id).collect()
    }

    /// Pool indices of players at a position
    pub fn indices_for(&self, position: Position) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, p)| p.record.position == position)
            .map(|(i, _)| i)
            .collect()
    }

    /// Pool indices of players from a club
    pub fn indices_for_club(&self, team_id: TeamId) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, p)| p.record.team_id == team_id)
            .map(|(i, _)| i)
            .collect()
    }
}
