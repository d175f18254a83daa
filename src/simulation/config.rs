//! Run configuration.

use crate::assignment::{ScoreWeights, StrategyKind};
use crate::availability::Breakdown;
use crate::error::{Result, SequencingError};
use crate::lanes::LineLayout;
use crate::rebalance::RebalanceConfig;
use crate::units::DEFAULT_DISTRIBUTION;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything that determines one run.
///
/// Runs with equal configurations, equal arrivals and an equal availability
/// set produce identical results.
///
/// # Defaults
///
/// ```
/// use u_sequencing::assignment::StrategyKind;
/// use u_sequencing::simulation::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.strategy, StrategyKind::HybridScored);
/// assert_eq!(config.total_units, 200);
/// assert_eq!(config.seed, 42);
/// assert!((config.pick_seconds - 30.0).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_sequencing::availability::Breakdown;
/// use u_sequencing::simulation::SimConfig;
///
/// let config = SimConfig::default()
///     .with_strategy_name("greedy")
///     .unwrap()
///     .with_total_units(500)
///     .with_seed(7)
///     .with_breakdown(Breakdown::new("L5", 60));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimConfig {
    /// Assignment policy.
    pub strategy: StrategyKind,

    /// Number of arrivals to generate for [`SimRunner::run_generated`].
    ///
    /// [`SimRunner::run_generated`]: super::SimRunner::run_generated
    pub total_units: usize,

    /// Seed for arrival generation and oven coin flips.
    pub seed: u64,

    /// Optional scheduled lane breakdown.
    pub breakdown: Option<Breakdown>,

    /// Lanes, capacities and the downstream subset.
    pub layout: LineLayout,

    pub rebalance: RebalanceConfig,

    /// Hybrid strategy score terms.
    pub weights: ScoreWeights,

    /// Simulated main-conveyor time per picked unit, in seconds.
    pub pick_seconds: f64,

    /// Probability that an arrival comes from the first oven.
    pub first_oven_probability: f64,

    /// Color mix for generated arrivals, one weight per palette color.
    pub color_weights: Vec<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            total_units: 200,
            seed: 42,
            breakdown: None,
            layout: LineLayout::reference(),
            rebalance: RebalanceConfig::default(),
            weights: ScoreWeights::default(),
            pick_seconds: 30.0,
            first_oven_probability: 0.5,
            color_weights: DEFAULT_DISTRIBUTION.to_vec(),
        }
    }
}

impl SimConfig {
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the strategy by name, failing with `InvalidStrategy`.
    pub fn with_strategy_name(mut self, name: &str) -> Result<Self> {
        self.strategy = name.parse()?;
        Ok(self)
    }

    pub fn with_total_units(mut self, n: usize) -> Self {
        self.total_units = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_breakdown(mut self, breakdown: Breakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    pub fn without_breakdown(mut self) -> Self {
        self.breakdown = None;
        self
    }

    pub fn with_layout(mut self, layout: LineLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_rebalance(mut self, rebalance: RebalanceConfig) -> Self {
        self.rebalance = rebalance;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_pick_seconds(mut self, seconds: f64) -> Self {
        self.pick_seconds = seconds;
        self
    }

    pub fn with_first_oven_probability(mut self, p: f64) -> Self {
        self.first_oven_probability = p;
        self
    }

    pub fn with_color_weights(mut self, weights: Vec<f64>) -> Self {
        self.color_weights = weights;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.rebalance.validate()?;

        if !self.pick_seconds.is_finite() || self.pick_seconds <= 0.0 {
            return Err(SequencingError::InvalidConfig(format!(
                "pick_seconds must be positive, got {}",
                self.pick_seconds
            )));
        }
        if !(0.0..=1.0).contains(&self.first_oven_probability) {
            return Err(SequencingError::InvalidConfig(format!(
                "first_oven_probability must be in [0, 1], got {}",
                self.first_oven_probability
            )));
        }
        if let Some(breakdown) = &self.breakdown {
            if !self.layout.lanes().iter().any(|l| l.name == breakdown.lane) {
                return Err(SequencingError::InvalidBreakdownLane(breakdown.lane.clone()));
            }
        }
        Ok(())
    }
}
