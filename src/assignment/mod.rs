//! Lane assignment policies.
//!
//! Every policy implements [`AssignmentStrategy`]: given an arriving unit and
//! an [`AssignContext`] listing the lanes it may use, pick one or none. The
//! oven penalty flag is computed identically for all policies.
//!
//! - [`FirstAvailable`]: first usable lane in oven-biased order
//! - [`GreedyMatch`]: first tail-color match, else first usable lane
//! - [`HybridScored`]: tail match, then rare-color spreading, then scoring
//!
//! [`StrategyKind`] is the closed, parseable selector used by run
//! configuration.

mod config;
mod strategies;
mod types;

pub use config::{ScoreWeights, StrategyKind};
pub use strategies::{FirstAvailable, GreedyMatch, HybridScored};
pub use types::{AssignContext, Assignment, AssignmentStrategy};
