//! Configuration for the ScoreEstimator

use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};
use crate::{DEFAULT_DENSITY_HORIZON, DEFAULT_FIXTURE_HORIZON, DEFAULT_HORIZON_DEPTH, MAX_HORIZON};

/// Configuration for the ScoreEstimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Latest completed gameweek; history after it is ignored
    pub current_gameweek: u32,

    /// How gameweek history is weighted into a trend score
    pub policy: ScoringPolicy,

    /// Upcoming gameweeks considered by the difficulty factor
    pub fixture_horizon: u32,

    /// Upcoming gameweeks considered by the density factor
    pub density_horizon: u32,

    /// Which fixture factors multiply the trend score
    pub combination: ScoreCombination,
}

/// Trend weighting scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Weight `1 - i/depth` on the i-th most recent entry
    LinearDecay { depth: usize },
    /// Fixed coefficients on gameweek offsets behind the current gameweek
    Tiered { tiers: Vec<ScoreTier> },
}

/// A bucket of gameweek offsets sharing one coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTier {
    /// First offset behind the current gameweek (inclusive)
    pub from_offset: u32,
    /// Last offset behind the current gameweek (inclusive)
    pub to_offset: u32,
    pub coefficient: f64,
}

/// Which fixture factors feed the projected score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCombination {
    /// Trend score only
    TrendOnly,
    /// Trend × density factor
    #[default]
    Density,
    /// Trend × difficulty factor
    Difficulty,
    /// Trend × density factor × difficulty factor
    DensityAndDifficulty,
}

impl ScoreTier {
    pub fn new(from_offset: u32, to_offset: u32, coefficient: f64) -> Self {
        Self { from_offset, to_offset, coefficient }
    }
}

impl ScoringPolicy {
    /// Round buckets 1-3, 4-6 and 7-9 gameweeks back at 1.0 / 0.5 / 0.2
    pub fn default_tiers() -> Self {
        ScoringPolicy::Tiered {
            tiers: vec![
                ScoreTier::new(1, 3, 1.0),
                ScoreTier::new(4, 6, 0.5),
                ScoreTier::new(7, 9, 0.2),
            ],
        }
    }

    /// Policy display name for logs
    pub fn name(&self) -> &'static str {
        self.build().name()
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy::LinearDecay { depth: DEFAULT_HORIZON_DEPTH }
    }
}

impl ScoreCombination {
    /// Multiplier applied to the trend score
    pub fn factor(&self, difficulty_factor: f64, density_factor: f64) -> f64 {
        match self {
            ScoreCombination::TrendOnly => 1.0,
            ScoreCombination::Density => density_factor,
            ScoreCombination::Difficulty => difficulty_factor,
            ScoreCombination::DensityAndDifficulty => density_factor * difficulty_factor,
        }
    }
}

impl EstimatorConfig {
    /// Reject horizons and policies that would silently flatten every projection
    pub fn validate(&self) -> Result<()> {
        for (field, horizon) in [("fixture_horizon", self.fixture_horizon), ("density_horizon", self.density_horizon)] {
            if horizon == 0 || horizon > MAX_HORIZON {
                return Err(EstimatorError::config(format!(
                    "{field} must be within 1..={MAX_HORIZON}, got {horizon}"
                )));
            }
        }

        match &self.policy {
            ScoringPolicy::LinearDecay { depth } => {
                if *depth == 0 {
                    return Err(EstimatorError::config("linear_decay depth must be at least 1"));
                }
            }
            ScoringPolicy::Tiered { tiers } => {
                if tiers.is_empty() {
                    return Err(EstimatorError::config("tiered policy needs at least one tier"));
                }
                if let Some(tier) =
                    tiers.iter().find(|t| t.from_offset > t.to_offset || !t.coefficient.is_finite())
                {
                    return Err(EstimatorError::config(format!(
                        "tier {}-{} with coefficient {} is invalid",
                        tier.from_offset, tier.to_offset, tier.coefficient
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            current_gameweek: 1,
            policy: ScoringPolicy::default(),
            fixture_horizon: DEFAULT_FIXTURE_HORIZON,
            density_horizon: DEFAULT_DENSITY_HORIZON,
            combination: ScoreCombination::default(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EstimatorConfig::default();
        assert_eq!(config.policy, ScoringPolicy::LinearDecay { depth: 5 });
        assert_eq!(config.fixture_horizon, 5);
        assert_eq!(config.density_horizon, 1);
        assert_eq!(config.combination, ScoreCombination::Density);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EstimatorConfig::default().validate().is_ok());
        let tiered = EstimatorConfig { policy: ScoringPolicy::default_tiers(), ..Default::default() };
        assert!(tiered.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_horizons() {
        let zero_density = EstimatorConfig { density_horizon: 0, ..Default::default() };
        let err = zero_density.validate().unwrap_err();
        assert!(err.to_string().contains("density_horizon"));

        let huge = EstimatorConfig { fixture_horizon: u32::MAX, ..Default::default() };
        assert!(matches!(huge.validate(), Err(EstimatorError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_policies() {
        let no_depth = EstimatorConfig { policy: ScoringPolicy::LinearDecay { depth: 0 }, ..Default::default() };
        assert!(no_depth.validate().is_err());

        let inverted = EstimatorConfig {
            policy: ScoringPolicy::Tiered { tiers: vec![ScoreTier::new(4, 2, 1.0)] },
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let empty = EstimatorConfig { policy: ScoringPolicy::Tiered { tiers: vec![] }, ..Default::default() };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_policy_names_match_built_policies() {
        assert_eq!(ScoringPolicy::default().name(), "linear_decay");
        assert_eq!(ScoringPolicy::default_tiers().name(), "tiered");
    }

    #[test]
    fn test_combination_factor() {
        assert_eq!(ScoreCombination::TrendOnly.factor(1.5, 2.0), 1.0);
        assert_eq!(ScoreCombination::Density.factor(1.5, 2.0), 2.0);
        assert_eq!(ScoreCombination::Difficulty.factor(1.5, 2.0), 1.5);
        assert_eq!(ScoreCombination::DensityAndDifficulty.factor(1.5, 2.0), 3.0);
    }

    #[test]
    fn test_policy_from_toml() {
        let config: EstimatorConfig = toml::from_str(
            r#"
            current_gameweek = 25
            combination = "density_and_difficulty"

            [policy]
            kind = "tiered"
            tiers = [
                { from_offset = 1, to_offset = 2, coefficient = 1.0 },
                { from_offset = 3, to_offset = 5, coefficient = 0.25 },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.current_gameweek, 25);
        assert_eq!(config.fixture_horizon, 5);
        assert_eq!(config.combination, ScoreCombination::DensityAndDifficulty);
        match config.policy {
            ScoringPolicy::Tiered { tiers } => {
                assert_eq!(tiers.len(), 2);
                assert_eq!(tiers[1], ScoreTier::new(3, 5, 0.25));
            }
            other => panic!("Expected tiered policy, got {other:?}"),
        }
    }

    #[test]
    fn test_policy_json_tag() {
        let json = serde_json::to_string(&ScoringPolicy::LinearDecay { depth: 10 }).unwrap();
        assert_eq!(json, r#"{"kind":"linear_decay","depth":10}"#);
    }
}
