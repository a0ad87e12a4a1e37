#![allow(dead_code)]

use fpl_data::{PlayerRecord, Position};
use score_estimator::ScoredPlayer;
use squad_optimizer::{CandidatePool, DifferentialScope, OptimizerConfig, SelectionResult};
use std::collections::BTreeMap;

pub fn player(
    id: u32,
    position: Position,
    team_id: u32,
    price_tenths: u32,
    ownership_pct: f64,
    score: f64,
) -> ScoredPlayer {
    ScoredPlayer::with_score(
        PlayerRecord {
            id,
            name: format!("{}{id}", position.code()),
            team_id,
            position,
            price_tenths,
            ownership_pct,
            minutes: 1500,
            availability_pct: Some(100.0),
            history: vec![],
        },
        score,
    )
}

/// Positions for a 40-player league: 4 GK, 13 DEF, 13 MID, 10 FWD
pub fn league_positions() -> Vec<Position> {
    let mut positions = Vec::new();
    for (position, count) in [
        (Position::Goalkeeper, 4),
        (Position::Defender, 13),
        (Position::Midfielder, 13),
        (Position::Forward, 10),
    ] {
        positions.extend(std::iter::repeat(position).take(count));
    }
    positions
}

/// Ownership pattern with five players under 5% and four between 5% and 10%
pub fn league_ownership(i: usize) -> f64 {
    match i % 9 {
        0 => 3.0,
        4 => 8.0,
        _ => 15.0 + (i % 40) as f64,
    }
}

/// Deterministic 40-player league over 12 clubs.
///
/// Prices stay within 4.0-6.5 so no 15-player squad exceeds the default budget.
pub fn league() -> Vec<ScoredPlayer> {
    league_positions()
        .into_iter()
        .enumerate()
        .map(|(i, position)| {
            player(
                i as u32 + 1,
                position,
                (i % 12) as u32 + 1,
                40 + 5 * ((i * 7) % 6) as u32,
                league_ownership(i),
                2.0 + ((i * 53) % 89) as f64 / 4.0,
            )
        })
        .collect()
}

pub fn league_pool() -> CandidatePool {
    CandidatePool::from_scored(league())
}

/// Fifteen players that form exactly one legal squad under the default config
pub fn exact_squad() -> Vec<ScoredPlayer> {
    let layout = [
        (Position::Goalkeeper, 2),
        (Position::Defender, 5),
        (Position::Midfielder, 5),
        (Position::Forward, 3),
    ];
    let mut players = Vec::new();
    for (position, count) in layout {
        for _ in 0..count {
            let i = players.len() as u32;
            let ownership = match i {
                2 => 3.0,
                7 => 8.0,
                _ => 25.0,
            };
            players.push(player(i + 1, position, i % 5 + 1, 60, ownership, 5.0 + i as f64));
        }
    }
    players
}

/// Independent re-check of every selection rule
pub fn assert_valid_squad(pool: &CandidatePool, config: &OptimizerConfig, result: &SelectionResult) {
    let starters = result.starters();
    let bench = result.bench();
    let captain = result.captain();

    assert_eq!(starters.len(), config.starting_size, "starter count");
    assert_eq!(bench.len(), config.squad_size - config.starting_size, "bench count");
    assert!(starters.contains(&captain), "captain {captain} must start");
    assert!(bench.iter().all(|i| !starters.contains(i)), "bench overlaps starters");
    assert_eq!((0..pool.len()).filter(|&i| result.is_captain(i)).count(), 1);

    let squad: Vec<&ScoredPlayer> =
        starters.iter().chain(&bench).map(|&i| pool.get(i).unwrap()).collect();
    let spend: u32 = squad.iter().map(|p| p.record.price_tenths).sum();
    assert!(spend as i64 <= config.budget_tenths(), "spend {spend} over budget");

    for (position, quota) in config.quotas.iter() {
        let started = starters.iter().filter(|&&i| pool.get(i).unwrap().record.position == position).count();
        let total = squad.iter().filter(|p| p.record.position == position).count();
        assert_eq!(total, quota.total, "{position} total");
        assert!(
            (quota.min_start..=quota.max_start).contains(&started),
            "{position} starting count {started}"
        );
    }

    let mut per_club: BTreeMap<u32, usize> = BTreeMap::new();
    for p in &squad {
        *per_club.entry(p.record.team_id).or_default() += 1;
    }
    assert!(per_club.values().all(|&c| c <= config.max_per_club), "club cap: {per_club:?}");

    for quota in &config.differential_quotas {
        let counted_pool: Vec<usize> = match config.differential_scope {
            DifferentialScope::StartersOnly => starters.clone(),
            DifferentialScope::Squad => starters.iter().chain(&bench).copied().collect(),
        };
        let counted = counted_pool
            .iter()
            .filter(|&&i| pool.get(i).unwrap().record.ownership_pct < quota.max_ownership_pct)
            .count();
        assert_eq!(counted, quota.exact_count, "{}", quota.label());
    }
}
