//! Lane records and the line layout.

use crate::error::{Result, SequencingError};
use crate::units::{Color, Unit};
use std::collections::{HashSet, VecDeque};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of a lane in declaration order.
///
/// Declaration order is the canonical iteration order wherever ties must be
/// broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaneId(pub usize);

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Static description of one lane.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaneSpec {
    pub name: String,
    pub capacity: usize,
    /// Lane belongs to the subset reserved primarily for the second oven.
    pub downstream: bool,
}

impl LaneSpec {
    pub fn new(name: impl Into<String>, capacity: usize, downstream: bool) -> Self {
        Self {
            name: name.into(),
            capacity,
            downstream,
        }
    }
}

/// Ordered set of lanes making up the buffer.
///
/// # Examples
///
/// ```
/// use u_sequencing::lanes::LineLayout;
///
/// let layout = LineLayout::reference();
/// assert_eq!(layout.lanes().len(), 9);
/// assert_eq!(layout.total_capacity(), 4 * 14 + 5 * 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineLayout {
    lanes: Vec<LaneSpec>,
}

impl LineLayout {
    pub fn new(lanes: Vec<LaneSpec>) -> Self {
        Self { lanes }
    }

    /// Nine lanes: L1–L4 hold 14 units, L5–L9 hold 16 and form the
    /// downstream subset.
    pub fn reference() -> Self {
        let lanes = (1..=9)
            .map(|i| {
                let downstream = i >= 5;
                let capacity = if downstream { 16 } else { 14 };
                LaneSpec::new(format!("L{i}"), capacity, downstream)
            })
            .collect();
        Self { lanes }
    }

    pub fn lanes(&self) -> &[LaneSpec] {
        &self.lanes
    }

    pub fn total_capacity(&self) -> usize {
        self.lanes.iter().map(|l| l.capacity).sum()
    }

    /// Checks for at least one lane, unique names and positive capacities.
    pub fn validate(&self) -> Result<()> {
        if self.lanes.is_empty() {
            return Err(SequencingError::InvalidConfig(
                "layout must declare at least one lane".into(),
            ));
        }
        let mut seen = HashSet::new();
        for lane in &self.lanes {
            if !seen.insert(lane.name.as_str()) {
                return Err(SequencingError::InvalidConfig(format!(
                    "duplicate lane name: {}",
                    lane.name
                )));
            }
            if lane.capacity == 0 {
                return Err(SequencingError::InvalidConfig(format!(
                    "lane {} must have positive capacity",
                    lane.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for LineLayout {
    fn default() -> Self {
        Self::reference()
    }
}

/// A fixed-capacity FIFO holding buffer.
///
/// Front is the oldest unit, tail the newest.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lane {
    name: String,
    capacity: usize,
    downstream: bool,
    units: VecDeque<Unit>,
}

impl Lane {
    pub fn new(spec: &LaneSpec) -> Self {
        Self {
            name: spec.name.clone(),
            capacity: spec.capacity,
            downstream: spec.downstream,
            units: VecDeque::with_capacity(spec.capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_downstream(&self) -> bool {
        self.downstream
    }

    pub fn occupancy(&self) -> usize {
        self.units.len()
    }

    pub fn free_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.units.len())
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.units.len() >= self.capacity
    }

    /// Occupancy over capacity; zero for a zero-capacity lane.
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.units.len() as f64 / self.capacity as f64
        }
    }

    pub fn front(&self) -> Option<&Unit> {
        self.units.front()
    }

    pub fn tail(&self) -> Option<&Unit> {
        self.units.back()
    }

    pub fn tail_color(&self) -> Option<Color> {
        self.units.back().map(Unit::color)
    }

    /// Units from front to tail.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub(crate) fn push_tail(&mut self, unit: Unit) -> Result<()> {
        if self.is_full() {
            return Err(SequencingError::CapacityExceeded {
                lane: self.name.clone(),
            });
        }
        self.units.push_back(unit);
        Ok(())
    }

    pub(crate) fn pop_front(&mut self) -> Result<Unit> {
        self.units
            .pop_front()
            .ok_or_else(|| SequencingError::EmptyLane {
                lane: self.name.clone(),
            })
    }

    pub(crate) fn pop_tail(&mut self) -> Result<Unit> {
        self.units.pop_back().ok_or_else(|| SequencingError::EmptyLane {
            lane: self.name.clone(),
        })
    }
}
