//! Step-response figures of merit
//!
//! Used to compare gain sets numerically: steady-state offset of P-only
//! control, overshoot reduction from velocity feedback, settling time.

use crate::scenario::Scenario;
use crate::trajectory::Trajectory;
use crate::utils::constants::SETTLING_BAND;

/// Summary of one step response
///
/// All quantities are measured against a step from `start` to `target`.
/// Times are in seconds on the trajectory's own time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMetrics {
    pub final_value: f64,
    /// `target - final_value`
    pub steady_state_error: f64,
    /// Most extreme sample in the direction of the step
    pub peak: f64,
    pub peak_time: f64,
    /// Peak excursion beyond the target, in percent of the step size
    pub overshoot_percent: f64,
    /// First time the output covers 90% of the step, measured from the 10% crossing
    pub rise_time: Option<f64>,
    /// Time after which the output stays inside the settling band
    pub settling_time: Option<f64>,
}

impl StepMetrics {
    /// Measure a trajectory against an explicit step
    ///
    /// `band` is relative to the step size (0.02 for a 2% band). Returns
    /// `None` for an empty trajectory or a zero-size step.
    pub fn measure(trajectory: &Trajectory, start: f64, target: f64, band: f64) -> Option<Self> {
        let samples = trajectory.samples();
        let final_value = trajectory.final_value()?;
        let step = target - start;
        if step == 0.0 {
            return None;
        }
        let direction = step.signum();

        // Progress along the step: 0 at start, 1 at target
        let progress = |x: f64| (x - start) / step;

        let (peak_index, peak) = samples
            .iter()
            .copied()
            .enumerate()
            .fold((0, samples[0]), |(bi, bx), (i, x)| {
                if direction * x > direction * bx {
                    (i, x)
                } else {
                    (bi, bx)
                }
            });
        let overshoot_percent = ((progress(peak) - 1.0) * 100.0).max(0.0);

        let rise_time = {
            let low = samples.iter().position(|&x| progress(x) >= 0.1);
            let high = samples.iter().position(|&x| progress(x) >= 0.9);
            match (low, high) {
                (Some(l), Some(h)) => Some(trajectory.time_at(h) - trajectory.time_at(l)),
                _ => None,
            }
        };

        let tolerance = band * step.abs();
        let settling_time = match samples
            .iter()
            .rposition(|&x| !((x - target).abs() <= tolerance))
        {
            None => Some(0.0),
            Some(k) if k + 1 < samples.len() => Some(trajectory.time_at(k + 1)),
            Some(_) => None,
        };

        Some(Self {
            final_value,
            steady_state_error: target - final_value,
            peak,
            peak_time: trajectory.time_at(peak_index),
            overshoot_percent,
            rise_time,
            settling_time,
        })
    }

    /// Measure against the scenario's own reference step
    ///
    /// The step runs from the first to the last reference sample, with the
    /// default 2% settling band.
    pub fn for_scenario(trajectory: &Trajectory, scenario: &Scenario) -> Option<Self> {
        let start = scenario.reference().first().copied()?;
        Self::measure(trajectory, start, scenario.final_reference(), SETTLING_BAND)
    }

    pub fn is_settled(&self) -> bool {
        self.settling_time.is_some()
    }
}
