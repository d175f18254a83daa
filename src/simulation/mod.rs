//! End-to-end simulation runs.
//!
//! [`SimRunner`] drives one run: every arrival goes through availability
//! filtering and the configured assignment strategy, rebalancing runs at a
//! fixed arrival interval, and the picker then drains the buffer. The
//! result carries the buffer snapshot, the picked sequence and the
//! [`KpiRecord`](crate::kpi::KpiRecord).
//!
//! Runs are single-threaded and deterministic in
//! `(config, arrivals, availability)`.

mod compare;
mod config;
mod runner;

pub use compare::{Comparison, KpiDelta};
pub use config::SimConfig;
pub use runner::{RunInputs, RunResult, SimRunner};
