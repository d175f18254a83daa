//! Draining the buffer onto the main conveyor.
//!
//! Each pick takes the front unit of a lane. The color shown at the front of
//! the most lanes wins; among lanes showing it, the longest lane gives up its
//! front unit. This keeps same-color runs going on the output.

use crate::error::Result;
use crate::lanes::{LaneId, LanePool};
use crate::units::{Color, Unit};

/// Counts color changes along an output sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeoverCounter {
    last: Option<Color>,
    count: usize,
}

impl ChangeoverCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one emitted color. The first emission never counts.
    pub fn observe(&mut self, color: Color) {
        if self.last.is_some_and(|last| last != color) {
            self.count += 1;
        }
        self.last = Some(color);
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Result of draining a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickOutcome {
    /// Units in pick order.
    pub sequence: Vec<Unit>,
    /// Lane each unit was picked from, parallel to `sequence`.
    pub lanes: Vec<LaneId>,
    pub changeovers: usize,
}

/// Support-maximizing picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Picker;

impl Picker {
    /// Lane the next unit should come from, or `None` if the pool is empty.
    ///
    /// Ties on color support go to the color seen first when scanning lanes
    /// in declaration order; ties on lane length go to the lane declared
    /// first.
    pub fn select(pool: &LanePool) -> Option<LaneId> {
        let fronts: Vec<(LaneId, Color)> = pool
            .ids()
            .filter_map(|id| pool.front(id).map(|u| (id, u.color())))
            .collect();

        let mut support: Vec<(Color, usize)> = Vec::new();
        for &(_, color) in &fronts {
            match support.iter_mut().find(|(c, _)| *c == color) {
                Some((_, n)) => *n += 1,
                None => support.push((color, 1)),
            }
        }

        let mut target: Option<(Color, usize)> = None;
        for &(color, n) in &support {
            if target.is_none_or(|(_, best)| n > best) {
                target = Some((color, n));
            }
        }
        let (target, _) = target?;

        let mut chosen: Option<(LaneId, usize)> = None;
        for &(id, color) in &fronts {
            if color != target {
                continue;
            }
            let len = pool.occupancy(id);
            if chosen.is_none_or(|(_, best)| len > best) {
                chosen = Some((id, len));
            }
        }
        chosen.map(|(id, _)| id)
    }

    /// Removes and returns the next unit with its source lane.
    pub fn pick_next(pool: &mut LanePool) -> Result<Option<(LaneId, Unit)>> {
        match Self::select(pool) {
            Some(id) => Ok(Some((id, pool.pop_front(id)?))),
            None => Ok(None),
        }
    }

    /// Picks until every lane is empty.
    pub fn drain(pool: &mut LanePool) -> Result<PickOutcome> {
        let mut outcome = PickOutcome {
            sequence: Vec::with_capacity(pool.total_units()),
            lanes: Vec::with_capacity(pool.total_units()),
            changeovers: 0,
        };
        let mut counter = ChangeoverCounter::new();

        while let Some((id, unit)) = Self::pick_next(pool)? {
            counter.observe(unit.color());
            outcome.lanes.push(id);
            outcome.sequence.push(unit);
        }

        outcome.changeovers = counter.count();
        Ok(outcome)
    }
}
