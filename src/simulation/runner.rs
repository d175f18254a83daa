//! Simulation orchestration: arrivals, periodic rebalancing, picking.

use super::config::SimConfig;
use crate::assignment::{AssignContext, StrategyKind};
use crate::availability::{AvailabilitySet, Breakdown};
use crate::error::Result;
use crate::kpi::{KpiAggregator, KpiRecord};
use crate::lanes::{Lane, LanePool};
use crate::picking::Picker;
use crate::random::create_rng;
use crate::rebalance::Rebalancer;
use crate::units::{Oven, Unit, UnitGenerator};
use rand::Rng;
use tracing::{debug, info, instrument};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The inputs a run was started with.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunInputs {
    pub strategy: StrategyKind,
    pub total_units: usize,
    pub seed: u64,
    pub breakdown: Option<Breakdown>,
}

/// Artifacts of one completed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunResult {
    pub inputs: RunInputs,

    /// Lane contents when the last arrival had been processed, before
    /// picking started.
    pub buffered: Vec<Lane>,

    /// Lane contents at the end of the run. Picking drains every lane, so
    /// these are always empty.
    pub lanes: Vec<Lane>,

    /// Units in the order they left the buffer.
    pub sequence: Vec<Unit>,

    pub kpis: KpiRecord,
}

/// Executes simulation runs.
///
/// # Usage
///
/// ```
/// use u_sequencing::availability::AvailabilitySet;
/// use u_sequencing::simulation::{SimConfig, SimRunner};
///
/// let config = SimConfig::default().with_total_units(100).with_seed(1);
/// let result = SimRunner::run_generated(&config, &AvailabilitySet::new()).unwrap();
///
/// let kpis = result.kpis;
/// assert_eq!(kpis.total_input, 100);
/// assert_eq!(kpis.total_input, kpis.total_assigned + kpis.overflows);
/// assert_eq!(kpis.total_picked, kpis.total_assigned);
/// ```
pub struct SimRunner;

impl SimRunner {
    /// Generates the arrivals from the configuration's count and seed, then
    /// runs.
    pub fn run_generated(config: &SimConfig, availability: &AvailabilitySet) -> Result<RunResult> {
        let units = UnitGenerator::new(&config.color_weights)?
            .generate(config.total_units, config.seed);
        Self::run(config, availability, units)
    }

    /// Runs the arrival loop over `units`, then drains the buffer.
    ///
    /// Each arrival is tagged with an oven by a seeded coin flip, offered to
    /// the strategy over the lanes usable at the current step, and either
    /// placed or counted as an overflow. An overflow is also a reroute when
    /// the broken-down lane is the only reason it had nowhere to go. Every
    /// `rebalance.interval` arrivals a rebalancing pass runs, never filling
    /// lanes that are out of service for the next arrival.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, including a breakdown naming an
    /// unknown lane. Capacity or empty-lane errors would indicate a bug.
    #[instrument(skip_all, fields(strategy = %config.strategy, seed = config.seed, units = units.len()))]
    pub fn run(
        config: &SimConfig,
        availability: &AvailabilitySet,
        units: Vec<Unit>,
    ) -> Result<RunResult> {
        config.validate()?;

        let mut pool = LanePool::new(&config.layout);
        let breakdown = config
            .breakdown
            .as_ref()
            .map(|b| b.resolve(&pool))
            .transpose()?;
        let strategy = config.strategy.build(config.weights);
        let rebalancer = Rebalancer::new(config.rebalance);
        let mut rng = create_rng(config.seed);
        let mut kpi = KpiAggregator::new();

        info!(lanes = pool.len(), capacity = pool.total_capacity(), "run started");

        for (step, mut unit) in units.into_iter().enumerate() {
            kpi.record_input();

            let oven = if rng.random::<f64>() < config.first_oven_probability {
                Oven::First
            } else {
                Oven::Second
            };
            unit.tag_oven(oven);

            let decision = {
                let ctx = AssignContext::new(&pool, oven, |id| {
                    availability.usable(&pool, id, step, breakdown.as_ref())
                });
                strategy.assign(&unit, &ctx)
            };

            match decision.lane {
                Some(lane) => {
                    pool.append(lane, unit)?;
                    kpi.record_assigned(decision.penalty);
                }
                None if availability.lost_to_breakdown(&pool, step, breakdown.as_ref()) => {
                    debug!(unit = unit.id(), step, "rerouted from broken lane");
                    kpi.record_reroute();
                }
                None => {
                    debug!(unit = unit.id(), step, "no usable lane");
                    kpi.record_overflow();
                }
            }

            // `processed` is also the step of the next arrival.
            let processed = step + 1;
            if rebalancer.config().is_due(processed) {
                let accepts: Vec<bool> = pool
                    .ids()
                    .map(|id| !availability.is_blocked(&pool, id, processed, breakdown.as_ref()))
                    .collect();
                let moves = rebalancer.rebalance_with(&mut pool, |id| accepts[id.0])?;
                if moves > 0 {
                    debug!(processed, moves, "rebalance pass");
                }
                kpi.record_rebalance(moves);
            }
        }

        let buffered = pool.lanes().to_vec();
        let outcome = Picker::drain(&mut pool)?;
        kpi.record_picking(outcome.sequence.len(), outcome.changeovers);
        let kpis = kpi.finalize(config.pick_seconds);

        info!(
            input = kpis.total_input,
            assigned = kpis.total_assigned,
            overflows = kpis.overflows,
            reroutes = kpis.breakdown_reroutes,
            changeovers = kpis.changeovers,
            rebalance_moves = kpis.rebalance_moves,
            "run finished"
        );

        Ok(RunResult {
            inputs: RunInputs {
                strategy: config.strategy,
                total_units: config.total_units,
                seed: config.seed,
                breakdown: config.breakdown.clone(),
            },
            buffered,
            lanes: pool.into_lanes(),
            sequence: outcome.sequence,
            kpis,
        })
    }

    /// Runs every configuration with generated arrivals, returning results
    /// in input order.
    ///
    /// With the `parallel` feature the runs execute on the rayon pool; each
    /// run still owns its generator, so results do not depend on scheduling.
    pub fn run_batch(
        configs: &[SimConfig],
        availability: &AvailabilitySet,
    ) -> Vec<Result<RunResult>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            configs
                .par_iter()
                .map(|config| Self::run_generated(config, availability))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            configs
                .iter()
                .map(|config| Self::run_generated(config, availability))
                .collect()
        }
    }
}
