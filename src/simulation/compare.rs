//! Strategy-versus-baseline comparison.

use super::config::SimConfig;
use super::runner::{RunResult, SimRunner};
use crate::assignment::StrategyKind;
use crate::availability::AvailabilitySet;
use crate::error::Result;
use crate::kpi::KpiRecord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Signed KPI differences, primary minus baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KpiDelta {
    pub total_picked: i64,
    pub overflows: i64,
    pub changeovers: i64,
    pub oven_penalties: i64,
    pub breakdown_reroutes: i64,
    pub rebalance_moves: i64,
    pub estimated_jph: f64,
}

impl KpiDelta {
    pub fn between(primary: &KpiRecord, baseline: &KpiRecord) -> Self {
        let d = |a: usize, b: usize| a as i64 - b as i64;
        Self {
            total_picked: d(primary.total_picked, baseline.total_picked),
            overflows: d(primary.overflows, baseline.overflows),
            changeovers: d(primary.changeovers, baseline.changeovers),
            oven_penalties: d(primary.oven_penalties, baseline.oven_penalties),
            breakdown_reroutes: d(primary.breakdown_reroutes, baseline.breakdown_reroutes),
            rebalance_moves: d(primary.rebalance_moves, baseline.rebalance_moves),
            estimated_jph: primary.estimated_jph - baseline.estimated_jph,
        }
    }
}

/// A configured run alongside the first-available baseline on the same
/// arrivals.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub primary: RunResult,
    pub baseline: RunResult,
}

impl Comparison {
    pub fn delta(&self) -> KpiDelta {
        KpiDelta::between(&self.primary.kpis, &self.baseline.kpis)
    }
}

impl SimRunner {
    /// Runs `config` and the same configuration under the first-available
    /// strategy.
    pub fn compare_with_baseline(
        config: &SimConfig,
        availability: &AvailabilitySet,
    ) -> Result<Comparison> {
        let primary = Self::run_generated(config, availability)?;
        let baseline_config = config
            .clone()
            .with_strategy(StrategyKind::FirstAvailable);
        let baseline = Self::run_generated(&baseline_config, availability)?;
        Ok(Comparison { primary, baseline })
    }
}
