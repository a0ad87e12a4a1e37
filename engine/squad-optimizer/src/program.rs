//! Linear program for squad selection
//!
//! The program is plain data so it can be handed to any [`crate::SolverBackend`]
//! and moved across threads. Columns are laid out role-major: all `start`
//! variables, then all `captain` variables, then all `bench` variables.

use fpl_data::Position;
use std::fmt;
use tracing::debug;

use crate::config::{DifferentialScope, OptimizerConfig};
use crate::pool::CandidatePool;

/// Decision variable family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Start,
    Captain,
    Bench,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Start, Role::Captain, Role::Bench];

    fn offset(&self) -> usize {
        match self {
            Role::Start => 0,
            Role::Captain => 1,
            Role::Bench => 2,
        }
    }
}

/// Constraint relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Le,
    Ge,
    Eq,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sense::Le => "<=",
            Sense::Ge => ">=",
            Sense::Eq => "==",
        })
    }
}

/// `Σ coeff · x[column] (sense) rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn new(name: impl Into<String>, terms: Vec<(usize, f64)>, sense: Sense, rhs: f64) -> Self {
        Self { name: name.into(), terms, sense, rhs }
    }

    /// Left-hand side under an assignment
    pub fn lhs(&self, assignment: &[f64]) -> f64 {
        self.terms.iter().map(|&(column, coeff)| coeff * assignment[column]).sum()
    }

    /// Whether the assignment satisfies the constraint within `tolerance`
    pub fn is_satisfied(&self, assignment: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(assignment);
        match self.sense {
            Sense::Le => lhs <= self.rhs + tolerance,
            Sense::Ge => lhs >= self.rhs - tolerance,
            Sense::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Maximisation program over binary columns
#[derive(Debug, Clone)]
pub struct SquadProgram {
    candidates: usize,
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
}

impl SquadProgram {
    /// Build variables, objective and constraints for a pool
    pub fn build(pool: &CandidatePool, config: &OptimizerConfig) -> Self {
        let n = pool.len();
        let mut program = Self {
            candidates: n,
            objective: vec![0.0; 3 * n],
            constraints: Vec::with_capacity(2 * n + 32),
        };

        for (i, score) in pool.scores().into_iter().enumerate() {
            // Lower indices win ties between otherwise equal selections
            let penalty = if n > 0 { config.tie_break_epsilon * i as f64 / n as f64 } else { 0.0 };
            let (start, captain, bench) =
                (program.column(Role::Start, i), program.column(Role::Captain, i), program.column(Role::Bench, i));
            program.objective[start] = score - penalty;
            program.objective[captain] = score - penalty;
            program.objective[bench] = config.bench_weight * score - penalty;
        }

        program.add_budget(pool, config);
        program.add_position_constraints(pool, config);
        program.add_club_caps(pool, config);
        program.add_squad_counts(config);
        program.add_role_links();
        program.add_differentials(pool, config);

        debug!(
            "Built squad program: {} candidates, {} columns, {} constraints",
            n,
            program.column_count(),
            program.constraints.len()
        );
        program
    }

    /// Column index of a role variable for a pool index
    pub fn column(&self, role: Role, index: usize) -> usize {
        role.offset() * self.candidates + index
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates
    }

    pub fn column_count(&self) -> usize {
        3 * self.candidates
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Constraints the assignment violates
    pub fn violations(&self, assignment: &[f64], tolerance: f64) -> Vec<&LinearConstraint> {
        self.constraints.iter().filter(|c| !c.is_satisfied(assignment, tolerance)).collect()
    }

    fn squad_terms(&self, indices: impl IntoIterator<Item = usize>, coeff: impl Fn(usize) -> f64) -> Vec<(usize, f64)> {
        indices
            .into_iter()
            .flat_map(|i| {
                let c = coeff(i);
                [(self.column(Role::Start, i), c), (self.column(Role::Bench, i), c)]
            })
            .collect()
    }

    fn start_terms(&self, indices: impl IntoIterator<Item = usize>) -> Vec<(usize, f64)> {
        indices.into_iter().map(|i| (self.column(Role::Start, i), 1.0)).collect()
    }

    fn add_budget(&mut self, pool: &CandidatePool, config: &OptimizerConfig) {
        let prices = pool.prices_tenths();
        let terms = self.squad_terms(0..self.candidates, |i| prices[i] as f64);
        self.constraints.push(LinearConstraint::new(
            "budget",
            terms,
            Sense::Le,
            config.budget_tenths() as f64,
        ));
    }

    fn add_position_constraints(&mut self, pool: &CandidatePool, config: &OptimizerConfig) {
        for (position, quota) in config.quotas.iter() {
            let indices = pool.indices_for(position);

            let total = self.squad_terms(indices.iter().copied(), |_| 1.0);
            self.constraints.push(LinearConstraint::new(
                position_label("position_total", position),
                total,
                Sense::Eq,
                quota.total as f64,
            ));

            let starts = self.start_terms(indices.iter().copied());
            self.constraints.push(LinearConstraint::new(
                position_label("position_start_min", position),
                starts.clone(),
                Sense::Ge,
                quota.min_start as f64,
            ));
            self.constraints.push(LinearConstraint::new(
                position_label("position_start_max", position),
                starts,
                Sense::Le,
                quota.max_start as f64,
            ));
        }
    }

    fn add_club_caps(&mut self, pool: &CandidatePool, config: &OptimizerConfig) {
        for club in pool.distinct_clubs() {
            let terms = self.squad_terms(pool.indices_for_club(club), |_| 1.0);
            self.constraints.push(LinearConstraint::new(
                format!("club_cap[{club}]"),
                terms,
                Sense::Le,
                config.max_per_club as f64,
            ));
        }
    }

    fn add_squad_counts(&mut self, config: &OptimizerConfig) {
        let n = self.candidates;

        let starters = self.start_terms(0..n);
        self.constraints.push(LinearConstraint::new(
            "starting_size",
            starters,
            Sense::Eq,
            config.starting_size as f64,
        ));

        let captains = (0..n).map(|i| (self.column(Role::Captain, i), 1.0)).collect();
        self.constraints.push(LinearConstraint::new("captain_count", captains, Sense::Eq, 1.0));

        let squad = self.squad_terms(0..n, |_| 1.0);
        self.constraints.push(LinearConstraint::new(
            "squad_size",
            squad,
            Sense::Eq,
            config.squad_size as f64,
        ));
    }

    fn add_role_links(&mut self) {
        for i in 0..self.candidates {
            let start = self.column(Role::Start, i);
            let captain = self.column(Role::Captain, i);
            let bench = self.column(Role::Bench, i);

            self.constraints.push(LinearConstraint::new(
                format!("role_disjoint[{i}]"),
                vec![(start, 1.0), (bench, 1.0)],
                Sense::Le,
                1.0,
            ));
            self.constraints.push(LinearConstraint::new(
                format!("captain_starts[{i}]"),
                vec![(captain, 1.0), (start, -1.0)],
                Sense::Le,
                0.0,
            ));
        }
    }

    fn add_differentials(&mut self, pool: &CandidatePool, config: &OptimizerConfig) {
        let ownership = pool.ownership();
        for quota in &config.differential_quotas {
            let indices = (0..self.candidates).filter(|&i| quota.includes(ownership[i]));
            let terms = match config.differential_scope {
                DifferentialScope::StartersOnly => self.start_terms(indices),
                DifferentialScope::Squad => self.squad_terms(indices, |_| 1.0),
            };
            self.constraints.push(LinearConstraint::new(
                quota.label(),
                terms,
                Sense::Eq,
                quota.exact_count as f64,
            ));
        }
    }
}

/// Constraint name for a position, e.g. `position_total[GK]`
pub fn position_label(prefix: &str, position: Position) -> String {
    format!("{prefix}[{}]", position.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpl_data::PlayerRecord;
    use score_estimator::ScoredPlayer;

    fn pool() -> CandidatePool {
        let players = (0..6u32)
            .map(|i| {
                ScoredPlayer::with_score(
                    PlayerRecord {
                        id: i,
                        name: format!("P{i}"),
                        team_id: 10 + i % 2,
                        position: Position::ALL[(i % 4) as usize],
                        price_tenths: 40 + i,
                        ownership_pct: if i == 0 { 3.0 } else { 25.0 },
                        minutes: 1000,
                        availability_pct: Some(100.0),
                        history: vec![],
                    },
                    10.0 + i as f64,
                )
            })
            .collect();
        CandidatePool::from_scored(players)
    }

    #[test]
    fn test_column_layout() {
        let program = SquadProgram::build(&pool(), &OptimizerConfig::default());
        assert_eq!(program.column_count(), 18);
        assert_eq!(program.column(Role::Start, 2), 2);
        assert_eq!(program.column(Role::Captain, 2), 8);
        assert_eq!(program.column(Role::Bench, 2), 14);
    }

    #[test]
    fn test_objective_coefficients() {
        let config = OptimizerConfig { tie_break_epsilon: 0.0, ..Default::default() };
        let program = SquadProgram::build(&pool(), &config);

        assert_eq!(program.objective()[program.column(Role::Start, 1)], 11.0);
        assert_eq!(program.objective()[program.column(Role::Captain, 1)], 11.0);
        assert!((program.objective()[program.column(Role::Bench, 1)] - 2.2).abs() < 1e-12);
    }

    #[test]
    fn test_every_role_column_weighted() {
        let config = OptimizerConfig { tie_break_epsilon: 0.0, bench_weight: 0.5, ..Default::default() };
        let pool = pool();
        let program = SquadProgram::build(&pool, &config);

        for (i, score) in pool.scores().into_iter().enumerate() {
            assert_eq!(program.objective()[program.column(Role::Start, i)], score);
            assert_eq!(program.objective()[program.column(Role::Captain, i)], score);
            assert_eq!(program.objective()[program.column(Role::Bench, i)], 0.5 * score);
        }
    }

    #[test]
    fn test_tie_break_prefers_low_indices() {
        let program = SquadProgram::build(&pool(), &OptimizerConfig::default());
        let objective = program.objective();
        let penalty = |i: usize| (10.0 + i as f64) - objective[program.column(Role::Start, i)];

        assert_eq!(penalty(0), 0.0);
        assert!(penalty(5) > penalty(1));
        assert!(penalty(5) < 1e-6);
    }

    #[test]
    fn test_one_club_cap_per_distinct_club() {
        let program = SquadProgram::build(&pool(), &OptimizerConfig::default());
        let caps: Vec<&str> = program
            .constraints()
            .iter()
            .filter(|c| c.name.starts_with("club_cap"))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(caps, vec!["club_cap[10]", "club_cap[11]"]);
    }

    #[test]
    fn test_budget_counts_start_and_bench() {
        let program = SquadProgram::build(&pool(), &OptimizerConfig::default());
        let budget = program.constraint("budget").unwrap();

        assert_eq!(budget.sense, Sense::Le);
        assert_eq!(budget.rhs, 1000.0);
        assert_eq!(budget.terms.len(), 12);
        assert!(budget.terms.contains(&(program.column(Role::Bench, 3), 43.0)));
        assert!(!budget.terms.iter().any(|&(col, _)| col == program.column(Role::Captain, 3)));
    }

    #[test]
    fn test_differential_scope() {
        let program = SquadProgram::build(&pool(), &OptimizerConfig::default());
        let tight = program.constraint("differential[<5%]").unwrap();
        assert_eq!(tight.terms, vec![(0, 1.0)]);

        let config = OptimizerConfig { differential_scope: DifferentialScope::Squad, ..Default::default() };
        let program = SquadProgram::build(&pool(), &config);
        let tight = program.constraint("differential[<5%]").unwrap();
        assert_eq!(tight.terms, vec![(0, 1.0), (program.column(Role::Bench, 0), 1.0)]);
    }

    #[test]
    fn test_violations_reported_by_name() {
        let program = SquadProgram::build(&pool(), &OptimizerConfig::without_differentials());
        let mut assignment = vec![0.0; program.column_count()];
        // One captain who is not starting
        assignment[program.column(Role::Captain, 4)] = 1.0;

        let violated: Vec<&str> =
            program.violations(&assignment, 1e-6).iter().map(|c| c.name.as_str()).collect();
        assert!(violated.contains(&"captain_starts[4]"));
        assert!(violated.contains(&"starting_size"));
        assert!(!violated.contains(&"captain_count"));
    }
}
