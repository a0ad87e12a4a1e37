//! Configuration for the SquadOptimizer

use fpl_data::Position;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, SelectionError};

/// Configuration for the SquadOptimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Spending cap on starters plus bench, in currency units
    pub total_budget: f64,

    /// Total squad size (starters + bench)
    pub squad_size: usize,

    /// Number of starters
    pub starting_size: usize,

    /// Maximum squad members from one club
    pub max_per_club: usize,

    /// Fraction of a bench player's score counted in the objective
    pub bench_weight: f64,

    /// Which role assignments the differential quotas count
    pub differential_scope: DifferentialScope,

    /// Maximum solve time in milliseconds (None = unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_solve_time_ms: Option<u64>,

    /// Per-index objective penalty scale favouring low pool indices among ties
    pub tie_break_epsilon: f64,

    /// Starting ranges and totals per position
    pub quotas: PositionQuotas,

    /// Exact low-ownership counts, nested by threshold
    pub differential_quotas: Vec<DifferentialQuota>,
}

/// Starting range and squad total for one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionQuota {
    pub min_start: usize,
    pub max_start: usize,
    pub total: usize,
}

/// Quotas for every position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionQuotas {
    #[serde(rename = "GK", alias = "gk")]
    pub goalkeeper: PositionQuota,
    #[serde(rename = "DEF", alias = "def")]
    pub defender: PositionQuota,
    #[serde(rename = "MID", alias = "mid")]
    pub midfielder: PositionQuota,
    #[serde(rename = "FWD", alias = "fwd")]
    pub forward: PositionQuota,
}

/// Exactly `exact_count` selected players must own less than `max_ownership_pct`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferentialQuota {
    pub max_ownership_pct: f64,
    pub exact_count: usize,
}

/// Which players count toward differential quotas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferentialScope {
    /// Starters only
    #[default]
    StartersOnly,
    /// Starters and bench
    Squad,
}

impl PositionQuota {
    pub const fn new(min_start: usize, max_start: usize, total: usize) -> Self {
        Self { min_start, max_start, total }
    }
}

impl PositionQuotas {
    /// Quota for a position
    pub fn get(&self, position: Position) -> PositionQuota {
        match position {
            Position::Goalkeeper => self.goalkeeper,
            Position::Defender => self.defender,
            Position::Midfielder => self.midfielder,
            Position::Forward => self.forward,
        }
    }

    /// Iterate positions with their quotas in squad order
    pub fn iter(&self) -> impl Iterator<Item = (Position, PositionQuota)> + '_ {
        Position::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

impl Default for PositionQuotas {
    fn default() -> Self {
        Self {
            goalkeeper: PositionQuota::new(1, 1, 2),
            defender: PositionQuota::new(3, 5, 5),
            midfielder: PositionQuota::new(3, 5, 5),
            forward: PositionQuota::new(1, 3, 3),
        }
    }
}

impl DifferentialQuota {
    pub fn new(max_ownership_pct: f64, exact_count: usize) -> Self {
        Self { max_ownership_pct, exact_count }
    }

    /// Whether a player with this ownership counts toward the quota
    pub fn includes(&self, ownership_pct: f64) -> bool {
        ownership_pct < self.max_ownership_pct
    }

    /// Constraint name, e.g. `differential[<10%]`
    pub fn label(&self) -> String {
        format!("differential[<{}%]", self.max_ownership_pct)
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            total_budget: 100.0,
            squad_size: 15,
            starting_size: 11,
            max_per_club: 3,
            bench_weight: 0.2,
            differential_scope: DifferentialScope::StartersOnly,
            max_solve_time_ms: None,
            tie_break_epsilon: 1e-6,
            quotas: PositionQuotas::default(),
            differential_quotas: vec![DifferentialQuota::new(10.0, 2), DifferentialQuota::new(5.0, 1)],
        }
    }
}

impl OptimizerConfig {
    /// Config without differential quotas
    pub fn without_differentials() -> Self {
        Self { differential_quotas: Vec::new(), ..Default::default() }
    }

    /// Budget in tenths of a unit, rounded down
    pub fn budget_tenths(&self) -> i64 {
        (self.total_budget * 10.0 + 1e-6).floor() as i64
    }

    /// Number of bench slots
    pub fn bench_size(&self) -> usize {
        self.squad_size.saturating_sub(self.starting_size)
    }

    /// Maximum solve time as Duration
    pub fn max_solve_time(&self) -> Option<Duration> {
        self.max_solve_time_ms.map(Duration::from_millis)
    }

    /// Reject configurations that no pool could ever satisfy
    pub fn validate(&self) -> Result<()> {
        if !self.total_budget.is_finite() || self.total_budget <= 0.0 {
            return Err(SelectionError::config(format!(
                "total_budget must be positive, got {}",
                self.total_budget
            )));
        }
        if self.starting_size == 0 || self.starting_size > self.squad_size {
            return Err(SelectionError::config(format!(
                "starting_size {} must be between 1 and squad_size {}",
                self.starting_size, self.squad_size
            )));
        }
        if self.max_per_club == 0 {
            return Err(SelectionError::config("max_per_club must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.bench_weight) {
            return Err(SelectionError::config(format!(
                "bench_weight must be within [0, 1], got {}",
                self.bench_weight
            )));
        }
        if !(0.0..1e-3).contains(&self.tie_break_epsilon) {
            return Err(SelectionError::config(format!(
                "tie_break_epsilon must be within [0, 0.001), got {}",
                self.tie_break_epsilon
            )));
        }

        let mut total = 0;
        let mut min_start = 0;
        let mut max_start = 0;
        for (position, quota) in self.quotas.iter() {
            if quota.min_start > quota.max_start || quota.max_start > quota.total {
                return Err(SelectionError::config(format!(
                    "{position} quota requires min_start <= max_start <= total, got ({}, {}, {})",
                    quota.min_start, quota.max_start, quota.total
                )));
            }
            total += quota.total;
            min_start += quota.min_start;
            max_start += quota.max_start;
        }
        if total != self.squad_size {
            return Err(SelectionError::config(format!(
                "position totals sum to {total}, squad_size is {}",
                self.squad_size
            )));
        }
        if min_start > self.starting_size || max_start < self.starting_size {
            return Err(SelectionError::config(format!(
                "starting ranges [{min_start}, {max_start}] cannot field {} starters",
                self.starting_size
            )));
        }

        let counted = match self.differential_scope {
            DifferentialScope::StartersOnly => self.starting_size,
            DifferentialScope::Squad => self.squad_size,
        };
        for quota in &self.differential_quotas {
            if !(quota.max_ownership_pct > 0.0 && quota.max_ownership_pct <= 100.0) {
                return Err(SelectionError::config(format!(
                    "{} threshold must be within (0, 100]",
                    quota.label()
                )));
            }
            if quota.exact_count > counted {
                return Err(SelectionError::config(format!(
                    "{} asks for {} players, only {counted} are counted",
                    quota.label(),
                    quota.exact_count
                )));
            }
        }

        Ok(())
    }
}
