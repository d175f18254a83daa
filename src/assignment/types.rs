//! Core trait and decision records for lane assignment.

use crate::lanes::{LaneId, LanePool};
use crate::units::{Oven, Unit};

/// What the pool looks like to one arriving unit.
///
/// Holds the lanes the unit may use, both in declaration order and in the
/// unit's oven-biased preference order.
#[derive(Debug, Clone)]
pub struct AssignContext<'a> {
    pool: &'a LanePool,
    oven: Oven,
    candidates: Vec<LaneId>,
    preferred: Vec<LaneId>,
}

impl<'a> AssignContext<'a> {
    /// Builds the view, keeping only lanes for which `usable` holds.
    pub fn new(pool: &'a LanePool, oven: Oven, usable: impl Fn(LaneId) -> bool) -> Self {
        let candidates: Vec<LaneId> = pool.ids().filter(|&id| usable(id)).collect();
        let preferred = pool
            .oven_order(oven)
            .into_iter()
            .filter(|id| candidates.contains(id))
            .collect();
        Self {
            pool,
            oven,
            candidates,
            preferred,
        }
    }

    /// Every lane with room, ignoring manual marks and breakdowns.
    pub fn open_lanes(pool: &'a LanePool, oven: Oven) -> Self {
        Self::new(pool, oven, |id| pool.is_available(id))
    }

    pub fn pool(&self) -> &LanePool {
        self.pool
    }

    pub fn oven(&self) -> Oven {
        self.oven
    }

    /// Usable lanes in declaration order.
    pub fn candidates(&self) -> &[LaneId] {
        &self.candidates
    }

    /// Usable lanes in oven-biased order.
    pub fn preferred(&self) -> &[LaneId] {
        &self.preferred
    }

    /// Placing the unit in `lane` is a first-oven unit landing in the
    /// downstream subset.
    pub fn is_penalized(&self, lane: LaneId) -> bool {
        self.oven == Oven::First && self.pool.lane(lane).is_downstream()
    }
}

/// Outcome of one assignment decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Chosen lane, or `None` when no lane was usable.
    pub lane: Option<LaneId>,
    /// First-oven unit sent to a downstream lane.
    pub penalty: bool,
}

impl Assignment {
    pub fn none() -> Self {
        Self {
            lane: None,
            penalty: false,
        }
    }
}

/// A lane assignment policy.
///
/// Implementations only pick a lane; the penalty flag is derived the same
/// way for every policy by [`assign`](AssignmentStrategy::assign).
///
/// # Examples
///
/// ```ignore
/// struct LastLane;
///
/// impl AssignmentStrategy for LastLane {
///     fn name(&self) -> &str { "last-lane" }
///     fn choose(&self, _unit: &Unit, ctx: &AssignContext<'_>) -> Option<LaneId> {
///         ctx.candidates().last().copied()
///     }
/// }
/// ```
pub trait AssignmentStrategy: Send + Sync {
    /// Returns the name of this strategy.
    fn name(&self) -> &str;

    /// Chooses a lane among `ctx`'s candidates, or `None`.
    fn choose(&self, unit: &Unit, ctx: &AssignContext<'_>) -> Option<LaneId>;

    /// Chooses a lane and flags the oven penalty.
    fn assign(&self, unit: &Unit, ctx: &AssignContext<'_>) -> Assignment {
        match self.choose(unit, ctx) {
            Some(lane) => Assignment {
                lane: Some(lane),
                penalty: ctx.is_penalized(lane),
            },
            None => Assignment::none(),
        }
    }
}
