//! Strategy selection and scoring weights.

use super::strategies::{FirstAvailable, GreedyMatch, HybridScored};
use super::types::AssignmentStrategy;
use crate::error::SequencingError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of assignment strategies.
///
/// Parses from its canonical name or the short alias:
///
/// ```
/// use u_sequencing::assignment::StrategyKind;
///
/// assert_eq!("hybrid".parse(), Ok(StrategyKind::HybridScored));
/// assert_eq!("greedy-match".parse(), Ok(StrategyKind::GreedyMatch));
/// assert!("lifo".parse::<StrategyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StrategyKind {
    /// First usable lane in oven-biased order.
    FirstAvailable,
    /// First tail-color match in oven-biased order, else first usable lane.
    GreedyMatch,
    /// Tail match, then rare-color spreading, then scoring.
    #[default]
    HybridScored,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::FirstAvailable,
        StrategyKind::GreedyMatch,
        StrategyKind::HybridScored,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::FirstAvailable => "first-available",
            StrategyKind::GreedyMatch => "greedy-match",
            StrategyKind::HybridScored => "hybrid-scored",
        }
    }

    /// Instantiates the strategy. Only the hybrid strategy reads `weights`.
    pub fn build(self, weights: ScoreWeights) -> Box<dyn AssignmentStrategy> {
        match self {
            StrategyKind::FirstAvailable => Box::new(FirstAvailable),
            StrategyKind::GreedyMatch => Box::new(GreedyMatch),
            StrategyKind::HybridScored => Box::new(HybridScored::new(weights)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = SequencingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" | "first-available" => Ok(StrategyKind::FirstAvailable),
            "greedy" | "greedy-match" => Ok(StrategyKind::GreedyMatch),
            "hybrid" | "hybrid-scored" => Ok(StrategyKind::HybridScored),
            _ => Err(SequencingError::InvalidStrategy(s.to_string())),
        }
    }
}

/// Score terms of the hybrid strategy.
///
/// A lane scores `tail_match * [tail == color] + band_match * [same band]
/// + free capacity`, plus `oven_penalty` for a first-oven unit eyeing a
/// downstream lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreWeights {
    pub tail_match: i64,
    pub band_match: i64,
    pub oven_penalty: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            tail_match: 50,
            band_match: 20,
            oven_penalty: -30,
        }
    }
}

impl ScoreWeights {
    pub fn with_tail_match(mut self, w: i64) -> Self {
        self.tail_match = w;
        self
    }

    pub fn with_band_match(mut self, w: i64) -> Self {
        self.band_match = w;
        self
    }

    pub fn with_oven_penalty(mut self, w: i64) -> Self {
        self.oven_penalty = w;
        self
    }
}
