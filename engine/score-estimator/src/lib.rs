//! # ScoreEstimator
//!
//! Turns a player's gameweek history and their club's upcoming fixtures into a
//! single projected score.
//!
//! The trend part is produced by a [`WeightingPolicy`] (linear decay over the
//! most recent gameweeks, or fixed-coefficient round buckets). Two fixture
//! factors are derived from the club's schedule: a difficulty factor that is
//! neutral (1.0) for an average rating of 3, and a density factor that counts
//! blank and double gameweeks. [`ScoreCombination`] decides which factors are
//! folded into the projected score.

pub mod config;
pub mod error;
pub mod estimator;
pub mod fixtures;
pub mod policy;

pub use config::{EstimatorConfig, ScoreCombination, ScoreTier, ScoringPolicy};
pub use error::{EstimatorError, Result};
pub use estimator::{Estimate, ScoreEstimator, ScoredPlayer};
pub use fixtures::{density_factor, difficulty_factor};
pub use policy::{linear_decay_weight, LinearDecay, TieredBuckets, WeightingPolicy};

/// Average fixture difficulty rating; maps to a neutral difficulty factor
pub const NEUTRAL_DIFFICULTY: f64 = 3.0;

/// Default number of history entries considered by the linear decay policy
pub const DEFAULT_HORIZON_DEPTH: usize = 5;

/// Longest fixture window a configuration may ask for (one season)
pub const MAX_HORIZON: u32 = 38;

/// Default number of upcoming gameweeks used for the difficulty factor
pub const DEFAULT_FIXTURE_HORIZON: u32 = 5;

/// Default number of upcoming gameweeks used for the density factor
pub const DEFAULT_DENSITY_HORIZON: u32 = 1;
