//! Configuration errors raised before a simulation starts

use thiserror::Error;

/// Errors detected while validating a scenario or a comparison.
///
/// All of them are raised before the first step executes. Numerical
/// divergence during a run is not reported here; see [`crate::simulation`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    #[error("Horizon must be positive and finite, got {0}")]
    InvalidHorizon(f64),

    #[error("{signal} has {actual} samples, expected {expected}")]
    LengthMismatch {
        signal: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Sample count for horizon {horizon} and timestep {dt} does not fit in memory")]
    TooManySamples { horizon: f64, dt: f64 },

    #[error("Duplicate configuration label: {0}")]
    DuplicateLabel(String),
}
