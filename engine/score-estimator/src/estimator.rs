use fpl_data::{FixtureRecord, FixtureTable, PlayerRecord};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EstimatorConfig;
use crate::fixtures::{density_factor, difficulty_factor};
use crate::policy::WeightingPolicy;

/// Projection components for one player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    pub trend_score: f64,
    pub difficulty_factor: f64,
    pub density_factor: f64,
    /// Multiplier actually applied to the trend score
    pub fixture_factor: f64,
    pub projected_score: f64,
}

/// A player record with its derived projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPlayer {
    pub record: PlayerRecord,
    pub trend_score: f64,
    pub difficulty_factor: f64,
    pub density_factor: f64,
    pub fixture_factor: f64,
    pub projected_score: f64,
}

impl ScoredPlayer {
    pub fn new(record: PlayerRecord, estimate: Estimate) -> Self {
        Self {
            record,
            trend_score: estimate.trend_score,
            difficulty_factor: estimate.difficulty_factor,
            density_factor: estimate.density_factor,
            fixture_factor: estimate.fixture_factor,
            projected_score: estimate.projected_score,
        }
    }

    /// Player with a fixed projection and neutral factors
    pub fn with_score(record: PlayerRecord, projected_score: f64) -> Self {
        Self {
            record,
            trend_score: projected_score,
            difficulty_factor: 1.0,
            density_factor: 1.0,
            fixture_factor: 1.0,
            projected_score,
        }
    }
}

/// Projected score calculator
pub struct ScoreEstimator {
    config: EstimatorConfig,
    policy: Box<dyn WeightingPolicy>,
}

impl ScoreEstimator {
    /// Create an estimator using the policy selected by the configuration
    pub fn new(config: EstimatorConfig) -> Self {
        let policy = config.policy.build();
        Self { config, policy }
    }

    /// Create an estimator with a custom weighting policy
    pub fn with_policy(config: EstimatorConfig, policy: Box<dyn WeightingPolicy>) -> Self {
        Self { config, policy }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate one player against their club's fixture list
    pub fn estimate(&self, player: &PlayerRecord, team_fixtures: &[FixtureRecord]) -> Estimate {
        let current = self.config.current_gameweek;

        let trend_score = self.policy.trend_score(&player.history, current);
        let difficulty_factor = difficulty_factor(team_fixtures, current, self.config.fixture_horizon);
        let density_factor = density_factor(team_fixtures, current, self.config.density_horizon);
        let fixture_factor = self.config.combination.factor(difficulty_factor, density_factor);

        let projected = trend_score * fixture_factor;
        let projected_score = if projected.is_finite() { projected.max(0.0) } else { 0.0 };

        debug!(
            "Estimated player {} ({}): trend {:.2}, difficulty {:.2}, density {:.2}, projected {:.2}",
            player.id, player.name, trend_score, difficulty_factor, density_factor, projected_score
        );

        Estimate { trend_score, difficulty_factor, density_factor, fixture_factor, projected_score }
    }

    /// Estimate one player and attach the result
    pub fn score(&self, player: &PlayerRecord, team_fixtures: &[FixtureRecord]) -> ScoredPlayer {
        ScoredPlayer::new(player.clone(), self.estimate(player, team_fixtures))
    }

    /// Score every player in parallel; output order matches input order
    pub fn score_all(&self, players: &[PlayerRecord], fixtures: &FixtureTable) -> Vec<ScoredPlayer> {
        let scored: Vec<ScoredPlayer> = players
            .par_iter()
            .map(|player| self.score(player, fixtures.for_team(player.team_id)))
            .collect();

        info!(
            "Scored {} players with {} policy (gameweek {}, combination {:?})",
            scored.len(),
            self.policy.name(),
            self.config.current_gameweek,
            self.config.combination
        );
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScoreCombination, ScoringPolicy};
    use fpl_data::{GameweekPoints, Position};

    fn player(team_id: u32, history: &[(u32, f64)]) -> PlayerRecord {
        PlayerRecord {
            id: team_id * 100,
            name: format!("Player{team_id}"),
            team_id,
            position: Position::Midfielder,
            price_tenths: 60,
            ownership_pct: 12.0,
            minutes: 1500,
            availability_pct: Some(100.0),
            history: history.iter().map(|&(gw, pts)| GameweekPoints::new(gw, pts)).collect(),
        }
    }

    fn estimator(combination: ScoreCombination, depth: usize) -> ScoreEstimator {
        ScoreEstimator::new(EstimatorConfig {
            current_gameweek: 10,
            policy: ScoringPolicy::LinearDecay { depth },
            fixture_horizon: 2,
            density_horizon: 1,
            combination,
        })
    }

    #[test]
    fn test_short_history_uses_available_entries() {
        let estimator = estimator(ScoreCombination::TrendOnly, 10);
        let p = player(1, &[(9, 5.0), (10, 8.0)]);

        let estimate = estimator.estimate(&p, &[]);

        // 8*1.0 + 5*0.9
        assert!(estimate.projected_score.is_finite());
        assert!((estimate.trend_score - 12.5).abs() < 1e-9);
        assert!((estimate.projected_score - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_fixtures_gives_neutral_difficulty() {
        let estimator = estimator(ScoreCombination::Difficulty, 5);
        let estimate = estimator.estimate(&player(1, &[(10, 4.0)]), &[]);

        assert_eq!(estimate.difficulty_factor, 1.0);
        assert_eq!(estimate.fixture_factor, 1.0);
        assert!((estimate.projected_score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_combination_doubles_for_double_gameweek() {
        let estimator = estimator(ScoreCombination::Density, 5);
        let fixtures = vec![FixtureRecord::new(1, 11, 2), FixtureRecord::new(1, 11, 4)];

        let estimate = estimator.estimate(&player(1, &[(10, 6.0)]), &fixtures);

        assert_eq!(estimate.density_factor, 2.0);
        assert!((estimate.projected_score - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_blank_gameweek_zeroes_projection() {
        let estimator = estimator(ScoreCombination::Density, 5);
        let fixtures = vec![FixtureRecord::new(1, 12, 3)];

        let estimate = estimator.estimate(&player(1, &[(10, 6.0)]), &fixtures);
        assert_eq!(estimate.projected_score, 0.0);
        // Difficulty is still reported even though it is not applied
        assert!((estimate.difficulty_factor - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_and_difficulty_combination() {
        let estimator = estimator(ScoreCombination::DensityAndDifficulty, 5);
        let fixtures = vec![FixtureRecord::new(1, 11, 2), FixtureRecord::new(1, 12, 2)];

        let estimate = estimator.estimate(&player(1, &[(10, 4.0)]), &fixtures);

        // density 1.0, difficulty 3*2/4 = 1.5
        assert!((estimate.fixture_factor - 1.5).abs() < 1e-9);
        assert!((estimate.projected_score - 6.0).abs() < 1e-9);
    }

    /// Counts games played in the window, ignoring points
    struct AppearancesPolicy;

    impl WeightingPolicy for AppearancesPolicy {
        fn trend_score(&self, history: &[GameweekPoints], current_gameweek: u32) -> f64 {
            history.iter().filter(|gw| gw.gameweek <= current_gameweek).count() as f64
        }

        fn name(&self) -> &'static str {
            "appearances"
        }
    }

    #[test]
    fn test_custom_policy_replaces_configured_one() {
        let config = EstimatorConfig {
            current_gameweek: 10,
            combination: ScoreCombination::Density,
            ..Default::default()
        };
        let estimator = ScoreEstimator::with_policy(config, Box::new(AppearancesPolicy));
        let fixtures = vec![FixtureRecord::new(1, 11, 2), FixtureRecord::new(1, 11, 4)];

        // Three appearances up to gameweek 10, doubled by the double gameweek
        let scored = estimator.score(&player(1, &[(8, 20.0), (9, 1.0), (10, 7.0), (11, 9.0)]), &fixtures);
        assert_eq!(scored.trend_score, 3.0);
        assert_eq!(scored.projected_score, 6.0);
        assert_eq!(estimator.config().policy, ScoringPolicy::default());
    }

    #[test]
    fn test_negative_trend_clamped() {
        let estimator = estimator(ScoreCombination::TrendOnly, 5);
        let estimate = estimator.estimate(&player(1, &[(10, -2.0)]), &[]);

        assert_eq!(estimate.trend_score, -2.0);
        assert_eq!(estimate.projected_score, 0.0);
    }

    #[test]
    fn test_score_all_preserves_order_and_team_fixtures() {
        let estimator = estimator(ScoreCombination::Density, 5);
        let players: Vec<PlayerRecord> =
            (1..=40).map(|team| player(team, &[(10, team as f64)])).collect();
        // Only team 3 has a fixture next gameweek
        let table = FixtureTable::from_records(vec![FixtureRecord::new(3, 11, 3)]);

        let scored = estimator.score_all(&players, &table);

        assert_eq!(scored.len(), 40);
        for (input, output) in players.iter().zip(&scored) {
            assert_eq!(input.id, output.record.id);
        }
        assert!((scored[2].projected_score - 3.0).abs() < 1e-9);
        assert_eq!(scored[0].projected_score, 0.0);
    }
}
