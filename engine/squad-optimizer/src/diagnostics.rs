//! Pre-solve infeasibility checks
//!
//! These catch the common reasons a pool cannot produce a squad and name the
//! constraint at fault. They are necessary conditions only; a pool that passes
//! can still be proven infeasible by the solver.

use std::collections::BTreeMap;

use crate::config::{DifferentialScope, OptimizerConfig};
use crate::error::SelectionError;
use crate::pool::CandidatePool;
use crate::program::position_label;

/// First detectable cause of infeasibility, if any
pub fn find_infeasibility(pool: &CandidatePool, config: &OptimizerConfig) -> Option<SelectionError> {
    check_position_supply(pool, config)
        .or_else(|| check_differential_supply(pool, config))
        .or_else(|| check_club_spread(pool, config))
        .or_else(|| check_cheapest_squad(pool, config))
}

fn check_position_supply(pool: &CandidatePool, config: &OptimizerConfig) -> Option<SelectionError> {
    config.quotas.iter().find_map(|(position, quota)| {
        let available = pool.indices_for(position).len();
        (available < quota.total).then(|| {
            SelectionError::infeasible(
                position_label("position_total", position),
                format!("{available} {position} candidates for {} squad slots", quota.total),
            )
        })
    })
}

fn check_differential_supply(pool: &CandidatePool, config: &OptimizerConfig) -> Option<SelectionError> {
    let mut quotas = config.differential_quotas.clone();
    quotas.sort_by(|a, b| a.max_ownership_pct.total_cmp(&b.max_ownership_pct));

    for quota in &quotas {
        let available = pool.iter().filter(|p| quota.includes(p.record.ownership_pct)).count();
        if available < quota.exact_count {
            return Some(SelectionError::infeasible(
                quota.label(),
                format!("{available} candidates below {}% ownership, {} required", quota.max_ownership_pct, quota.exact_count),
            ));
        }
    }

    // A tighter threshold selects a subset, so its count cannot exceed a looser one
    for pair in quotas.windows(2) {
        let (tight, loose) = (&pair[0], &pair[1]);
        if tight.exact_count > loose.exact_count {
            return Some(SelectionError::infeasible(
                loose.label(),
                format!(
                    "{} requires {} players but nested {} requires {}",
                    loose.label(),
                    loose.exact_count,
                    tight.label(),
                    tight.exact_count
                ),
            ));
        }
    }

    // Players at or above the loosest threshold must fill the remaining counted slots
    if let Some(loosest) = quotas.last() {
        let counted = match config.differential_scope {
            DifferentialScope::StartersOnly => config.starting_size,
            DifferentialScope::Squad => config.squad_size,
        };
        let others = pool.iter().filter(|p| !loosest.includes(p.record.ownership_pct)).count();
        if others + loosest.exact_count < counted {
            return Some(SelectionError::infeasible(
                loosest.label(),
                format!(
                    "only {others} candidates at or above {}% ownership for {} remaining slots",
                    loosest.max_ownership_pct,
                    counted - loosest.exact_count
                ),
            ));
        }
    }
    None
}

fn check_club_spread(pool: &CandidatePool, config: &OptimizerConfig) -> Option<SelectionError> {
    let mut per_club: BTreeMap<u32, usize> = BTreeMap::new();
    for club in pool.clubs() {
        *per_club.entry(club).or_default() += 1;
    }
    let reachable: usize = per_club.values().map(|&count| count.min(config.max_per_club)).sum();

    (reachable < config.squad_size).then(|| {
        SelectionError::infeasible(
            "club_cap",
            format!(
                "{} clubs with at most {} players each can supply {reachable} of {} squad slots",
                per_club.len(),
                config.max_per_club,
                config.squad_size
            ),
        )
    })
}

fn check_cheapest_squad(pool: &CandidatePool, config: &OptimizerConfig) -> Option<SelectionError> {
    let prices = pool.prices_tenths();
    let mut cheapest: i64 = 0;
    for (position, quota) in config.quotas.iter() {
        let mut position_prices: Vec<u32> =
            pool.indices_for(position).into_iter().map(|i| prices[i]).collect();
        position_prices.sort_unstable();
        cheapest += position_prices.iter().take(quota.total).map(|&p| p as i64).sum::<i64>();
    }

    (cheapest > config.budget_tenths()).then(|| {
        SelectionError::infeasible(
            "budget",
            format!(
                "cheapest legal squad costs {:.1}, budget is {:.1}",
                cheapest as f64 / 10.0,
                config.total_budget
            ),
        )
    })
}
