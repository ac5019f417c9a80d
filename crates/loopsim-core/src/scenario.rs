//! Simulation scenario: time grid, reference and disturbance

use crate::error::ConfigError;
use crate::signal::StepSignal;

/// Number of samples on `[0, horizon)` with spacing `dt`
///
/// Computed as `ceil(horizon / dt)`, the length of the grid
/// `0, dt, 2*dt, ...` that stays below the horizon.
pub fn sample_count(dt: f64, horizon: f64) -> Result<usize, ConfigError> {
    if !(dt > 0.0 && dt.is_finite()) {
        return Err(ConfigError::InvalidTimestep(dt));
    }
    if !(horizon > 0.0 && horizon.is_finite()) {
        return Err(ConfigError::InvalidHorizon(horizon));
    }

    let n = (horizon / dt).ceil();
    if !n.is_finite() || n > (usize::MAX >> 1) as f64 {
        return Err(ConfigError::TooManySamples { horizon, dt });
    }
    Ok(n as usize)
}

/// Validated, read-only description of one closed-loop experiment
///
/// Holds the fixed step `dt`, the horizon, and the reference and
/// disturbance sequences. Both sequences have exactly
/// [`sample_count`]`(dt, horizon)` entries; this is the length `N` of every
/// trajectory simulated against the scenario.
///
/// # Example
///
/// ```
/// use loopsim_core::{Scenario, StepSignal};
///
/// let scenario = Scenario::step_response(0.01, 6.0, StepSignal::unit(), None).unwrap();
/// assert_eq!(scenario.len(), 600);
/// assert_eq!(scenario.reference()[50], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    dt: f64,
    horizon: f64,
    reference: Vec<f64>,
    disturbance: Vec<f64>,
}

impl Scenario {
    /// Create scenario from explicit sequences
    ///
    /// A `None` disturbance is all zeros.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `dt` or `horizon` is not positive and
    /// finite, or if a sequence length differs from the sample count.
    pub fn new(
        dt: f64,
        horizon: f64,
        reference: Vec<f64>,
        disturbance: Option<Vec<f64>>,
    ) -> Result<Self, ConfigError> {
        let n = sample_count(dt, horizon)?;

        if reference.len() != n {
            return Err(ConfigError::LengthMismatch {
                signal: "reference",
                expected: n,
                actual: reference.len(),
            });
        }

        let disturbance = match disturbance {
            Some(d) if d.len() != n => {
                return Err(ConfigError::LengthMismatch {
                    signal: "disturbance",
                    expected: n,
                    actual: d.len(),
                })
            }
            Some(d) => d,
            None => vec![0.0; n],
        };

        Ok(Self {
            dt,
            horizon,
            reference,
            disturbance,
        })
    }

    /// Create scenario by sampling step signals on the time grid
    pub fn step_response(
        dt: f64,
        horizon: f64,
        reference: StepSignal,
        disturbance: Option<StepSignal>,
    ) -> Result<Self, ConfigError> {
        let n = sample_count(dt, horizon)?;
        Self::new(
            dt,
            horizon,
            reference.sample(dt, n),
            disturbance.map(|d| d.sample(dt, n)),
        )
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Sample count `N`
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    /// Always false for a validated scenario
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    pub fn disturbance(&self) -> &[f64] {
        &self.disturbance
    }

    /// Time of sample `k`
    #[inline]
    pub fn time_at(&self, k: usize) -> f64 {
        k as f64 * self.dt
    }

    /// Shared time axis `t_k = k * dt`
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.len()).map(|k| self.time_at(k)).collect()
    }

    /// Reference level at the end of the horizon
    pub fn final_reference(&self) -> f64 {
        self.reference.last().copied().unwrap_or(0.0)
    }

    /// Disturbance level at the end of the horizon
    pub fn final_disturbance(&self) -> f64 {
        self.disturbance.last().copied().unwrap_or(0.0)
    }
}
