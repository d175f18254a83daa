//! Vehicles arriving at the buffer.
//!
//! A [`Unit`] carries an id, a palette [`Color`] and an [`Oven`] tag that is
//! set when its assignment is attempted. [`UnitGenerator`] produces the
//! reproducible arrival sequence a run consumes.

mod generator;
mod types;

pub use generator::{UnitGenerator, DEFAULT_DISTRIBUTION};
pub use types::{Color, ColorBand, Oven, Unit};
