//! Fixture difficulty and density factors

use fpl_data::FixtureRecord;

use crate::policy::linear_decay_weight;
use crate::NEUTRAL_DIFFICULTY;

/// Gameweeks `current_gameweek + 1 ..= current_gameweek + horizon`
fn upcoming(current_gameweek: u32, horizon: u32) -> std::ops::RangeInclusive<u32> {
    match current_gameweek.checked_add(1) {
        Some(first) => first..=current_gameweek.saturating_add(horizon),
        None => 1..=0,
    }
}

/// `3 · horizon / Σ difficulty` over the fixtures in the upcoming window.
///
/// Returns exactly 1.0 when the window holds no difficulty (no fixtures found).
pub fn difficulty_factor(fixtures: &[FixtureRecord], current_gameweek: u32, horizon: u32) -> f64 {
    let window = upcoming(current_gameweek, horizon);
    let total: u32 = fixtures
        .iter()
        .filter(|f| window.contains(&f.gameweek))
        .map(|f| f.difficulty as u32)
        .sum();

    if total == 0 {
        return 1.0;
    }
    NEUTRAL_DIFFICULTY * horizon as f64 / total as f64
}

/// Decay-weighted count of fixtures in each of the next `horizon` gameweeks.
///
/// A blank gameweek contributes 0 for its slot, a double up to 2.
pub fn density_factor(fixtures: &[FixtureRecord], current_gameweek: u32, horizon: u32) -> f64 {
    upcoming(current_gameweek, horizon)
        .enumerate()
        .map(|(slot, gameweek)| {
            let count = fixtures.iter().filter(|f| f.gameweek == gameweek).count();
            linear_decay_weight(slot, horizon as usize) * count as f64
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures(entries: &[(u32, u8)]) -> Vec<FixtureRecord> {
        entries.iter().map(|&(gw, d)| FixtureRecord::new(1, gw, d)).collect()
    }

    #[test]
    fn test_difficulty_neutral_average() {
        let f = fixtures(&[(11, 3), (12, 3), (13, 3), (14, 3), (15, 3)]);
        assert!((difficulty_factor(&f, 10, 5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_difficulty_easy_and_hard_runs() {
        let easy = fixtures(&[(11, 2), (12, 2), (13, 2), (14, 2), (15, 2)]);
        assert!((difficulty_factor(&easy, 10, 5) - 1.5).abs() < 1e-12);

        let hard = fixtures(&[(11, 5), (12, 5)]);
        assert!((difficulty_factor(&hard, 10, 2) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_difficulty_outside_window_ignored() {
        // Gameweek 10 is already played, 13 is past a horizon of 2
        let f = fixtures(&[(10, 5), (11, 2), (12, 4), (13, 5)]);
        assert!((difficulty_factor(&f, 10, 2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_difficulty_zero_total_defaults_to_one() {
        assert_eq!(difficulty_factor(&[], 10, 5), 1.0);

        let zero_rated = fixtures(&[(11, 0), (12, 0)]);
        assert_eq!(difficulty_factor(&zero_rated, 10, 5), 1.0);
    }

    #[test]
    fn test_window_at_gameweek_limit() {
        let f = fixtures(&[(u32::MAX, 2)]);
        assert_eq!(difficulty_factor(&f, u32::MAX - 1, 5), 7.5);
        assert_eq!(difficulty_factor(&f, u32::MAX, 5), 1.0);
        assert_eq!(density_factor(&f, u32::MAX, 5), 0.0);
    }

    #[test]
    fn test_density_single_gameweek() {
        let normal = fixtures(&[(11, 3), (12, 3)]);
        assert_eq!(density_factor(&normal, 10, 1), 1.0);

        let double = fixtures(&[(11, 3), (11, 4)]);
        assert_eq!(density_factor(&double, 10, 1), 2.0);

        let blank = fixtures(&[(12, 3)]);
        assert_eq!(density_factor(&blank, 10, 1), 0.0);
    }

    #[test]
    fn test_density_weighted_window() {
        // Slot weights for horizon 4: 1.0, 0.75, 0.5, 0.25
        // Counts: gw 21 double, gw 22 blank, gw 23 single, gw 24 single
        let f = fixtures(&[(21, 2), (21, 3), (23, 4), (24, 2)]);
        let factor = density_factor(&f, 20, 4);
        assert!((factor - (2.0 + 0.0 + 0.5 + 0.25)).abs() < 1e-12, "got {factor}");
    }

    #[test]
    fn test_density_zero_horizon() {
        let f = fixtures(&[(11, 3)]);
        assert_eq!(density_factor(&f, 10, 0), 0.0);
    }
}
