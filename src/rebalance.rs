//! Load rebalancing between lanes.
//!
//! Moves units one at a time from the tail of the fullest overloaded lane
//! to the tail of the emptiest underfilled lane until no such pair exists.

use crate::error::{Result, SequencingError};
use crate::lanes::{LaneId, LanePool};
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When and how aggressively to rebalance.
///
/// # Examples
///
/// ```
/// use u_sequencing::rebalance::RebalanceConfig;
///
/// let config = RebalanceConfig::default().with_interval(50);
/// assert_eq!(config.interval, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RebalanceConfig {
    /// Run a pass after every `interval` processed arrivals. 0 disables
    /// rebalancing.
    pub interval: usize,

    /// A lane is overloaded when its fill ratio is strictly above this.
    pub high_threshold: f64,

    /// A lane is underfilled when its fill ratio is strictly below this.
    pub low_threshold: f64,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            interval: 30,
            high_threshold: 0.8,
            low_threshold: 0.5,
        }
    }
}

impl RebalanceConfig {
    pub fn with_interval(mut self, n: usize) -> Self {
        self.interval = n;
        self
    }

    pub fn with_high_threshold(mut self, t: f64) -> Self {
        self.high_threshold = t;
        self
    }

    pub fn with_low_threshold(mut self, t: f64) -> Self {
        self.low_threshold = t;
        self
    }

    /// Whether a pass is due after `processed` arrivals.
    pub fn is_due(&self, processed: usize) -> bool {
        self.interval > 0 && processed > 0 && processed % self.interval == 0
    }

    pub fn validate(&self) -> Result<()> {
        let in_unit = |t: f64| (0.0..=1.0).contains(&t);
        if !in_unit(self.high_threshold) || !in_unit(self.low_threshold) {
            return Err(SequencingError::InvalidConfig(format!(
                "rebalance thresholds must lie in [0, 1], got high={} low={}",
                self.high_threshold, self.low_threshold
            )));
        }
        if self.low_threshold > self.high_threshold {
            return Err(SequencingError::InvalidConfig(format!(
                "low threshold {} exceeds high threshold {}",
                self.low_threshold, self.high_threshold
            )));
        }
        Ok(())
    }
}

/// Executes rebalancing passes over a lane pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rebalancer {
    config: RebalanceConfig,
}

impl Rebalancer {
    pub fn new(config: RebalanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RebalanceConfig {
        &self.config
    }

    /// Runs one pass with every lane eligible as a destination.
    pub fn rebalance(&self, pool: &mut LanePool) -> Result<usize> {
        self.rebalance_with(pool, |_| true)
    }

    /// Runs one pass and returns the number of units moved.
    ///
    /// Only lanes for which `accepts` holds may receive units. A pass moves
    /// at most `pool.total_capacity()` units, which stops lanes of capacity
    /// one from trading a unit back and forth forever.
    pub fn rebalance_with(
        &self,
        pool: &mut LanePool,
        accepts: impl Fn(LaneId) -> bool,
    ) -> Result<usize> {
        let high = self.config.high_threshold;
        let low = self.config.low_threshold;
        let bound = pool.total_capacity();
        let mut moves = 0;

        loop {
            if moves >= bound {
                warn!(moves, "rebalance pass hit its move bound");
                break;
            }

            let sources: Vec<LaneId> = pool
                .ids()
                .filter(|&id| {
                    let lane = pool.lane(id);
                    !lane.is_empty() && lane.fill_ratio() > high
                })
                .collect();
            let destinations: Vec<LaneId> = pool
                .ids()
                .filter(|&id| {
                    let lane = pool.lane(id);
                    !lane.is_full() && lane.fill_ratio() < low && accepts(id)
                })
                .collect();

            // With `low <= high` (see `validate`) no lane is both a source
            // and a destination.
            let (Some(src), Some(dst)) = (
                extreme_ratio(pool, &sources, |a, b| a > b),
                extreme_ratio(pool, &destinations, |a, b| a < b),
            ) else {
                break;
            };

            pool.move_tail(src, dst)?;
            moves += 1;
            debug!(
                from = pool.lane(src).name(),
                to = pool.lane(dst).name(),
                "rebalanced one unit"
            );
        }

        Ok(moves)
    }
}

/// First lane in `ids` whose fill ratio beats every earlier one under
/// `better`.
fn extreme_ratio(pool: &LanePool, ids: &[LaneId], better: impl Fn(f64, f64) -> bool) -> Option<LaneId> {
    let mut best: Option<(LaneId, f64)> = None;
    for &id in ids {
        let ratio = pool.lane(id).fill_ratio();
        if best.is_none_or(|(_, b)| better(ratio, b)) {
            best = Some((id, ratio));
        }
    }
    best.map(|(id, _)| id)
}
