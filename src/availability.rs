//! Lane availability: manual maintenance marks and scheduled breakdowns.
//!
//! [`AvailabilitySet`] is owned by the host and outlives individual runs.
//! Hosts that need reproducible runs call [`AvailabilitySet::reset`] first.

use crate::error::{Result, SequencingError};
use crate::lanes::{LaneId, LanePool};
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Take a lane out of service from a given assignment step onwards.
///
/// The step counts assignment attempts already processed in the run, so
/// `step = 10` disables the lane for the 11th arrival and every later one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Breakdown {
    pub lane: String,
    pub step: usize,
}

impl Breakdown {
    pub fn new(lane: impl Into<String>, step: usize) -> Self {
        Self {
            lane: lane.into(),
            step,
        }
    }

    /// Binds the directive to a lane of `pool`.
    pub fn resolve(&self, pool: &LanePool) -> Result<ActiveBreakdown> {
        let lane = pool
            .lane_id(&self.lane)
            .ok_or_else(|| SequencingError::InvalidBreakdownLane(self.lane.clone()))?;
        Ok(ActiveBreakdown {
            lane,
            step: self.step,
        })
    }
}

/// A breakdown directive resolved against a lane pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveBreakdown {
    lane: LaneId,
    step: usize,
}

impl ActiveBreakdown {
    pub fn lane(&self) -> LaneId {
        self.lane
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Sticky: once `current_step` reaches the threshold the lane stays down.
    pub fn is_down(&self, lane: LaneId, current_step: usize) -> bool {
        lane == self.lane && current_step >= self.step
    }
}

/// Lanes manually marked unavailable, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySet {
    unavailable: BTreeSet<String>,
}

impl AvailabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the lane was not already marked.
    pub fn mark_unavailable(&mut self, lane: &str) -> bool {
        self.unavailable.insert(lane.to_string())
    }

    /// Returns `true` if the lane was marked before.
    pub fn mark_available(&mut self, lane: &str) -> bool {
        self.unavailable.remove(lane)
    }

    /// Clears every manual mark.
    pub fn reset(&mut self) {
        self.unavailable.clear();
    }

    pub fn is_marked(&self, lane: &str) -> bool {
        self.unavailable.contains(lane)
    }

    /// Marked lane names in sorted order.
    pub fn marked(&self) -> impl Iterator<Item = &str> {
        self.unavailable.iter().map(String::as_str)
    }

    /// Lane is out of service at `current_step`, regardless of its fill.
    pub fn is_blocked(
        &self,
        pool: &LanePool,
        lane: LaneId,
        current_step: usize,
        breakdown: Option<&ActiveBreakdown>,
    ) -> bool {
        self.is_marked(pool.lane(lane).name())
            || breakdown.is_some_and(|b| b.is_down(lane, current_step))
    }

    /// Lane can accept a unit at `current_step`: not marked, not broken
    /// down and not full.
    pub fn usable(
        &self,
        pool: &LanePool,
        lane: LaneId,
        current_step: usize,
        breakdown: Option<&ActiveBreakdown>,
    ) -> bool {
        !self.is_blocked(pool, lane, current_step, breakdown) && pool.is_available(lane)
    }

    /// The broken-down lane would accept a unit at `current_step` if it had
    /// not broken down: it is down, not marked and not full.
    pub fn lost_to_breakdown(
        &self,
        pool: &LanePool,
        current_step: usize,
        breakdown: Option<&ActiveBreakdown>,
    ) -> bool {
        breakdown.is_some_and(|b| {
            b.is_down(b.lane(), current_step)
                && !self.is_marked(pool.lane(b.lane()).name())
                && pool.is_available(b.lane())
        })
    }
}
