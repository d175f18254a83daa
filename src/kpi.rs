//! Run-level key performance indicators.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seconds in one hour, for jobs-per-hour conversion.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Final KPI record of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KpiRecord {
    pub total_input: usize,
    pub total_assigned: usize,
    pub total_picked: usize,
    /// Arrivals that were not placed, reroutes included.
    pub overflows: usize,
    pub changeovers: usize,
    /// First-oven units placed in a downstream lane.
    pub oven_penalties: usize,
    /// Arrivals whose chosen lane was broken down.
    pub breakdown_reroutes: usize,
    pub rebalance_moves: usize,
    /// Estimated jobs per hour on the main conveyor.
    pub estimated_jph: f64,
}

impl KpiRecord {
    /// Every input was either assigned or overflowed, and everything
    /// assigned was picked.
    pub fn is_balanced(&self) -> bool {
        self.total_input == self.total_assigned + self.overflows
            && self.total_picked == self.total_assigned
    }
}

/// Collects counts while a run is in progress.
#[derive(Debug, Clone, Default)]
pub struct KpiAggregator {
    record: KpiRecord,
}

impl KpiAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_input(&mut self) {
        self.record.total_input += 1;
    }

    /// A unit was placed; `penalty` marks a first-oven unit sent downstream.
    pub fn record_assigned(&mut self, penalty: bool) {
        self.record.total_assigned += 1;
        if penalty {
            self.record.oven_penalties += 1;
        }
    }

    pub fn record_overflow(&mut self) {
        self.record.overflows += 1;
    }

    /// A unit chose a broken-down lane. Also counted as an overflow.
    pub fn record_reroute(&mut self) {
        self.record.breakdown_reroutes += 1;
        self.record.overflows += 1;
    }

    pub fn record_rebalance(&mut self, moves: usize) {
        self.record.rebalance_moves += moves;
    }

    pub fn record_picking(&mut self, picked: usize, changeovers: usize) {
        self.record.total_picked += picked;
        self.record.changeovers += changeovers;
    }

    /// Snapshot of the counts so far, without throughput.
    pub fn current(&self) -> &KpiRecord {
        &self.record
    }

    /// Completes the record with the throughput estimate.
    pub fn finalize(mut self, pick_seconds: f64) -> KpiRecord {
        self.record.estimated_jph = estimated_jph(self.record.total_picked, pick_seconds);
        self.record
    }
}

/// Jobs per hour for `picked` units at `pick_seconds` each.
///
/// `picked / (picked * pick_seconds / 3600)` reduces to
/// `3600 / pick_seconds` for any `picked > 0`, so the reduced form is
/// returned and is independent of the count. Zero picks give zero.
pub fn estimated_jph(picked: usize, pick_seconds: f64) -> f64 {
    if picked == 0 || pick_seconds <= 0.0 {
        0.0
    } else {
        SECONDS_PER_HOUR / pick_seconds
    }
}
