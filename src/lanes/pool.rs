//! Capacity-bounded lane storage.

use super::types::{Lane, LaneId, LineLayout};
use crate::error::{Result, SequencingError};
use crate::units::{Color, Oven, Unit};

/// All lanes of the buffer, in declaration order.
///
/// The pool owns every buffered unit. Appends check capacity and pops check
/// emptiness; both report misuse as an error instead of mutating.
///
/// Lane ids are positions in the declaration order and are only valid for
/// the pool that issued them; passing a foreign id panics on indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanePool {
    lanes: Vec<Lane>,
}

impl LanePool {
    /// Creates empty lanes for every lane in the layout.
    pub fn new(layout: &LineLayout) -> Self {
        Self {
            lanes: layout.lanes().iter().map(Lane::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Lane ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = LaneId> + '_ {
        (0..self.lanes.len()).map(LaneId)
    }

    pub fn lane(&self, id: LaneId) -> &Lane {
        &self.lanes[id.0]
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn into_lanes(self) -> Vec<Lane> {
        self.lanes
    }

    pub fn lane_id(&self, name: &str) -> Option<LaneId> {
        self.lanes.iter().position(|l| l.name() == name).map(LaneId)
    }

    /// Whether the lane still has room for one more unit.
    pub fn is_available(&self, id: LaneId) -> bool {
        !self.lane(id).is_full()
    }

    pub fn tail_color(&self, id: LaneId) -> Option<Color> {
        self.lane(id).tail_color()
    }

    pub fn front(&self, id: LaneId) -> Option<&Unit> {
        self.lane(id).front()
    }

    pub fn occupancy(&self, id: LaneId) -> usize {
        self.lane(id).occupancy()
    }

    pub fn total_units(&self) -> usize {
        self.lanes.iter().map(Lane::occupancy).sum()
    }

    pub fn total_capacity(&self) -> usize {
        self.lanes.iter().map(Lane::capacity).sum()
    }

    pub fn is_drained(&self) -> bool {
        self.lanes.iter().all(Lane::is_empty)
    }

    pub fn append(&mut self, id: LaneId, unit: Unit) -> Result<()> {
        self.lanes[id.0].push_tail(unit)
    }

    pub fn pop_front(&mut self, id: LaneId) -> Result<Unit> {
        self.lanes[id.0].pop_front()
    }

    pub fn pop_tail(&mut self, id: LaneId) -> Result<Unit> {
        self.lanes[id.0].pop_tail()
    }

    /// Moves the tail unit of `from` onto the tail of `to`.
    ///
    /// Checks both ends before touching either lane, so a failed move leaves
    /// the pool unchanged.
    pub fn move_tail(&mut self, from: LaneId, to: LaneId) -> Result<()> {
        if !self.is_available(to) {
            return Err(SequencingError::CapacityExceeded {
                lane: self.lane(to).name().to_string(),
            });
        }
        let unit = self.pop_tail(from)?;
        self.append(to, unit)
    }

    /// Lane ids in the order an arriving unit from `oven` should try them.
    ///
    /// Second-oven units try the downstream subset first and then the rest;
    /// first-oven units use declaration order. Relative order inside each
    /// group follows declaration order.
    pub fn oven_order(&self, oven: Oven) -> Vec<LaneId> {
        match oven {
            Oven::First => self.ids().collect(),
            Oven::Second => {
                let (mut downstream, rest): (Vec<LaneId>, Vec<LaneId>) =
                    self.ids().partition(|&id| self.lane(id).is_downstream());
                downstream.extend(rest);
                downstream
            }
        }
    }
}
