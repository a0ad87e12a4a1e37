//! Trend weighting policies

use fpl_data::GameweekPoints;

use crate::config::{ScoreTier, ScoringPolicy};

/// Converts gameweek history into a single trend score
pub trait WeightingPolicy: Send + Sync {
    /// Trend score from history entries, ignoring gameweeks after `current_gameweek`
    fn trend_score(&self, history: &[GameweekPoints], current_gameweek: u32) -> f64;

    /// Policy name for logs
    fn name(&self) -> &'static str;
}

/// Linear decay weight for the i-th slot of a window of `depth` slots.
///
/// Slot 0 weighs 1.0 and the weight reaches 0 at the window boundary.
pub fn linear_decay_weight(i: usize, depth: usize) -> f64 {
    if depth == 0 || i >= depth {
        return 0.0;
    }
    1.0 - i as f64 / depth as f64
}

/// Weight `1 - i/depth` on the i-th most recent history entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDecay {
    pub depth: usize,
}

impl LinearDecay {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }
}

impl WeightingPolicy for LinearDecay {
    fn trend_score(&self, history: &[GameweekPoints], current_gameweek: u32) -> f64 {
        let mut played: Vec<&GameweekPoints> =
            history.iter().filter(|gw| gw.gameweek <= current_gameweek).collect();
        // Stable: entries sharing a gameweek (double fixtures) keep upstream order
        played.sort_by_key(|gw| gw.gameweek);

        played
            .iter()
            .rev()
            .take(self.depth)
            .enumerate()
            .map(|(i, gw)| linear_decay_weight(i, self.depth) * gw.points)
            .sum()
    }

    fn name(&self) -> &'static str {
        "linear_decay"
    }
}

/// Fixed coefficients on buckets of gameweek offsets, rounded to whole points
#[derive(Debug, Clone, PartialEq)]
pub struct TieredBuckets {
    pub tiers: Vec<ScoreTier>,
}

impl TieredBuckets {
    pub fn new(tiers: Vec<ScoreTier>) -> Self {
        Self { tiers }
    }

    fn coefficient_for(&self, offset: u32) -> f64 {
        self.tiers
            .iter()
            .find(|tier| (tier.from_offset..=tier.to_offset).contains(&offset))
            .map(|tier| tier.coefficient)
            .unwrap_or(0.0)
    }
}

impl WeightingPolicy for TieredBuckets {
    fn trend_score(&self, history: &[GameweekPoints], current_gameweek: u32) -> f64 {
        let raw: f64 = history
            .iter()
            .filter_map(|gw| {
                let offset = current_gameweek.checked_sub(gw.gameweek)?;
                Some(self.coefficient_for(offset) * gw.points)
            })
            .sum();
        raw.round()
    }

    fn name(&self) -> &'static str {
        "tiered"
    }
}

impl ScoringPolicy {
    /// Build the policy object selected by this configuration
    pub fn build(&self) -> Box<dyn WeightingPolicy> {
        match self {
            ScoringPolicy::LinearDecay { depth } => Box::new(LinearDecay::new(*depth)),
            ScoringPolicy::Tiered { tiers } => Box::new(TieredBuckets::new(tiers.clone())),
        }
    }
}
