use fpl_data::TeamId;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{DifferentialScope, OptimizerConfig};
use crate::error::{Result, SelectionError};
use crate::pool::CandidatePool;
use crate::program::{Role, SquadProgram};
use crate::INTEGRALITY_TOLERANCE;

/// Role of a pool index in the selected squad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SquadRole {
    /// Starting, and captain
    Captain,
    Starter,
    Bench,
}

/// Role assignment over a candidate pool's index space.
///
/// Only meaningful against the pool that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    starter: Vec<bool>,
    captain: Vec<bool>,
    bench: Vec<bool>,
    objective_value: f64,
}

impl SelectionResult {
    /// Read a solver assignment back into role arrays and re-validate it
    pub fn extract(
        pool: &CandidatePool,
        program: &SquadProgram,
        assignment: &[f64],
        config: &OptimizerConfig,
    ) -> Result<Self> {
        if program.candidate_count() != pool.len() {
            return Err(SelectionError::internal(format!(
                "program built for {} candidates, pool has {}",
                program.candidate_count(),
                pool.len()
            )));
        }
        if assignment.len() != program.column_count() {
            return Err(SelectionError::internal(format!(
                "assignment has {} values, program has {} columns",
                assignment.len(),
                program.column_count()
            )));
        }

        let read = |role: Role, key: &str| -> Result<Vec<bool>> {
            (0..pool.len()).map(|i| read_binary(assignment[program.column(role, i)], key, i)).collect()
        };
        let starter = read(Role::Start, "start")?;
        let captain = read(Role::Captain, "captain")?;
        let bench = read(Role::Bench, "bench")?;
        Self::from_roles(pool, starter, captain, bench, config)
    }

    /// Build from role arrays, validating every selection constraint
    pub fn from_roles(
        pool: &CandidatePool,
        starter: Vec<bool>,
        captain: Vec<bool>,
        bench: Vec<bool>,
        config: &OptimizerConfig,
    ) -> Result<Self> {
        let mut result = Self { starter, captain, bench, objective_value: 0.0 };
        result.validate(pool, config)?;
        result.objective_value = result.compute_objective(pool, config.bench_weight);
        Ok(result)
    }

    /// Re-check every selection constraint against the concrete squad
    pub fn validate(&self, pool: &CandidatePool, config: &OptimizerConfig) -> Result<()> {
        let n = pool.len();
        if self.starter.len() != n || self.captain.len() != n || self.bench.len() != n {
            return Err(SelectionError::internal("role arrays do not match pool size"));
        }

        let starters = count(&self.starter);
        if starters != config.starting_size {
            return Err(SelectionError::internal(format!(
                "{starters} starters selected, expected {}",
                config.starting_size
            )));
        }
        let captains = count(&self.captain);
        if captains != 1 {
            return Err(SelectionError::internal(format!("{captains} captains selected, expected 1")));
        }
        let bench = count(&self.bench);
        if bench != config.bench_size() {
            return Err(SelectionError::internal(format!(
                "{bench} bench players selected, expected {}",
                config.bench_size()
            )));
        }

        for i in 0..n {
            if self.captain[i] && !self.starter[i] {
                return Err(SelectionError::internal(format!("captain at index {i} is not starting")));
            }
            if self.starter[i] && self.bench[i] {
                return Err(SelectionError::internal(format!("index {i} is both starting and benched")));
            }
        }

        let spend = self.total_price_tenths(pool);
        if spend > config.budget_tenths() {
            return Err(SelectionError::internal(format!(
                "squad costs {:.1}, budget is {:.1}",
                spend as f64 / 10.0,
                config.total_budget
            )));
        }

        let positions = pool.positions();
        for (position, quota) in config.quotas.iter() {
            let at_position = || (0..n).filter(|&i| positions[i] == position);
            let started = at_position().filter(|&i| self.starter[i]).count();
            let total = at_position().filter(|&i| self.in_squad(i)).count();
            if total != quota.total {
                return Err(SelectionError::internal(format!(
                    "{total} {position} in squad, expected {}",
                    quota.total
                )));
            }
            if started < quota.min_start || started > quota.max_start {
                return Err(SelectionError::internal(format!(
                    "{started} {position} starting, expected {}-{}",
                    quota.min_start, quota.max_start
                )));
            }
        }

        let clubs = pool.clubs();
        let mut per_club: BTreeMap<TeamId, usize> = BTreeMap::new();
        for i in self.squad() {
            *per_club.entry(clubs[i]).or_default() += 1;
        }
        if let Some((club, &players)) = per_club.iter().find(|(_, &c)| c > config.max_per_club) {
            return Err(SelectionError::internal(format!(
                "club {club} supplies {players} players, cap is {}",
                config.max_per_club
            )));
        }

        for quota in &config.differential_quotas {
            let counted = pool
                .iter()
                .enumerate()
                .filter(|(i, p)| {
                    let selected = match config.differential_scope {
                        DifferentialScope::StartersOnly => self.starter[*i],
                        DifferentialScope::Squad => self.in_squad(*i),
                    };
                    selected && quota.includes(p.record.ownership_pct)
                })
                .count();
            if counted != quota.exact_count {
                return Err(SelectionError::internal(format!(
                    "{} counts {counted} players, expected {}",
                    quota.label(),
                    quota.exact_count
                )));
            }
        }

        Ok(())
    }

    fn compute_objective(&self, pool: &CandidatePool, bench_weight: f64) -> f64 {
        pool.iter()
            .enumerate()
            .map(|(i, p)| {
                let mut weight = 0.0;
                if self.starter[i] {
                    weight += 1.0;
                }
                if self.captain[i] {
                    weight += 1.0;
                }
                if self.bench[i] {
                    weight += bench_weight;
                }
                weight * p.projected_score
            })
            .sum()
    }

    /// Pool indices of starters, ascending
    pub fn starters(&self) -> Vec<usize> {
        indices(&self.starter)
    }

    /// Pool index of the captain
    pub fn captain(&self) -> usize {
        self.captain.iter().position(|&c| c).unwrap_or_default()
    }

    /// Pool indices of bench players, ascending
    pub fn bench(&self) -> Vec<usize> {
        indices(&self.bench)
    }

    /// Pool indices of starters and bench, ascending
    pub fn squad(&self) -> Vec<usize> {
        (0..self.starter.len()).filter(|&i| self.in_squad(i)).collect()
    }

    pub fn is_starter(&self, index: usize) -> bool {
        self.starter.get(index).copied().unwrap_or(false)
    }

    pub fn is_captain(&self, index: usize) -> bool {
        self.captain.get(index).copied().unwrap_or(false)
    }

    pub fn is_bench(&self, index: usize) -> bool {
        self.bench.get(index).copied().unwrap_or(false)
    }

    pub fn in_squad(&self, index: usize) -> bool {
        self.is_starter(index) || self.is_bench(index)
    }

    /// Role of a pool index, `None` when not selected
    pub fn role_of(&self, index: usize) -> Option<SquadRole> {
        if self.is_captain(index) {
            Some(SquadRole::Captain)
        } else if self.is_starter(index) {
            Some(SquadRole::Starter)
        } else if self.is_bench(index) {
            Some(SquadRole::Bench)
        } else {
            None
        }
    }

    /// Total price of starters and bench in tenths
    pub fn total_price_tenths(&self, pool: &CandidatePool) -> i64 {
        self.squad()
            .into_iter()
            .filter_map(|i| pool.get(i))
            .map(|p| p.record.price_tenths as i64)
            .sum()
    }

    /// Objective value of this selection, without tie-break penalties
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }
}

fn read_binary(value: f64, role: &str, index: usize) -> Result<bool> {
    if (value - 1.0).abs() <= INTEGRALITY_TOLERANCE {
        Ok(true)
    } else if value.abs() <= INTEGRALITY_TOLERANCE {
        Ok(false)
    } else {
        Err(SelectionError::internal(format!("{role}[{index}] = {value} is not binary")))
    }
}

fn count(flags: &[bool]) -> usize {
    flags.iter().filter(|&&f| f).count()
}

fn indices(flags: &[bool]) -> Vec<usize> {
    flags.iter().enumerate().filter(|(_, &f)| f).map(|(i, _)| i).collect()
}
