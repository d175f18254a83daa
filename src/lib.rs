//! Buffered vehicle-sequencing engine.
//!
//! Units arrive from upstream, are assigned to fixed-capacity holding lanes
//! by a pluggable policy, are periodically rebalanced between lanes, and are
//! finally picked onto a single conveyor in an order that favors long
//! same-color runs.
//!
//! - **Units** ([`units`]): vehicles with a palette color and oven tag, plus
//!   a seeded arrival generator.
//! - **Lanes** ([`lanes`]): the capacity-bounded lane pool.
//! - **Availability** ([`availability`]): manual lane marks and scheduled
//!   breakdowns.
//! - **Assignment** ([`assignment`]): first-available, greedy-match and
//!   hybrid-scored policies behind one trait.
//! - **Rebalancing** ([`rebalance`]): moves units from overloaded to
//!   underfilled lanes.
//! - **Picking** ([`picking`]): support-maximizing drain with changeover
//!   counting.
//! - **KPIs** ([`kpi`]): run counters and the throughput estimate.
//! - **Simulation** ([`simulation`]): configuration and the run orchestrator.
//!
//! Every run is deterministic: the same configuration, arrivals and
//! availability set give the same picked sequence and KPI record.
//!
//! # Example
//!
//! ```
//! use u_sequencing::availability::{AvailabilitySet, Breakdown};
//! use u_sequencing::simulation::{SimConfig, SimRunner};
//!
//! let mut availability = AvailabilitySet::new();
//! availability.reset();
//!
//! let config = SimConfig::default()
//!     .with_strategy_name("hybrid")?
//!     .with_total_units(200)
//!     .with_seed(42)
//!     .with_breakdown(Breakdown::new("L5", 60));
//!
//! let result = SimRunner::run_generated(&config, &availability)?;
//! assert_eq!(result.kpis.total_picked, result.kpis.total_assigned);
//! assert_eq!(result.kpis.estimated_jph, 120.0);
//! # Ok::<(), u_sequencing::SequencingError>(())
//! ```

pub mod assignment;
pub mod availability;
pub mod error;
pub mod kpi;
pub mod lanes;
pub mod picking;
pub mod random;
pub mod rebalance;
pub mod simulation;
pub mod units;

pub use error::{Result, SequencingError};
