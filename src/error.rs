//! Error taxonomy for the sequencing engine.
//!
//! Only programmer errors and invalid configuration are errors. A unit that
//! finds no usable lane is a counted outcome (overflow or reroute), never an
//! `Err`.

use thiserror::Error;

/// Errors raised by the sequencing engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequencingError {
    /// Append attempted on a lane that is already at capacity.
    #[error("lane {lane} is full")]
    CapacityExceeded { lane: String },

    /// Pop attempted on a lane holding no units.
    #[error("lane {lane} is empty")]
    EmptyLane { lane: String },

    /// Strategy name not recognised.
    #[error("unknown assignment strategy: {0}")]
    InvalidStrategy(String),

    /// Breakdown directive names a lane that is not part of the layout.
    #[error("breakdown names unknown lane: {0}")]
    InvalidBreakdownLane(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SequencingError>;
