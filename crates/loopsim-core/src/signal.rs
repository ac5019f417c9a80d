//! Step signal sources sampled on the simulation time grid

use crate::utils::constants::DEFAULT_STEP_TIME;

/// Which side of the switch time already carries the `after` level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    /// `after` for `t >= switch_time`
    #[default]
    Inclusive,
    /// `after` for `t > switch_time`
    Exclusive,
}

/// Step signal: y = before until the switch time, y = after from then on
///
/// Reference steps use [`Edge::Inclusive`], load disturbances use
/// [`Edge::Exclusive`] so they switch on strictly after their time.
///
/// # Example
///
/// ```
/// use loopsim_core::StepSignal;
///
/// let reference = StepSignal::new(0.0, 1.0, 0.5);
/// assert_eq!(reference.value_at(0.49), 0.0);
/// assert_eq!(reference.value_at(0.5), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSignal {
    before: f64,
    after: f64,
    switch_time: f64,
    edge: Edge,
}

impl StepSignal {
    /// Step from `before` to `after` at `switch_time` (inclusive edge)
    pub fn new(before: f64, after: f64, switch_time: f64) -> Self {
        Self {
            before,
            after,
            switch_time,
            edge: Edge::Inclusive,
        }
    }

    /// Additive load of `magnitude` switched on strictly after `switch_time`
    pub fn load(magnitude: f64, switch_time: f64) -> Self {
        Self {
            before: 0.0,
            after: magnitude,
            switch_time,
            edge: Edge::Exclusive,
        }
    }

    /// Signal that stays at `value`
    pub fn constant(value: f64) -> Self {
        Self::new(value, value, 0.0)
    }

    /// Unit step at t=0.5, the reference used by the demos
    pub fn unit() -> Self {
        Self::new(0.0, 1.0, DEFAULT_STEP_TIME)
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    pub fn before(&self) -> f64 {
        self.before
    }

    pub fn after(&self) -> f64 {
        self.after
    }

    pub fn switch_time(&self) -> f64 {
        self.switch_time
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        let switched = match self.edge {
            Edge::Inclusive => t >= self.switch_time,
            Edge::Exclusive => t > self.switch_time,
        };
        if switched {
            self.after
        } else {
            self.before
        }
    }

    /// Sample on `t_k = k * dt` for `k = 0..n`
    pub fn sample(&self, dt: f64, n: usize) -> Vec<f64> {
        (0..n).map(|k| self.value_at(k as f64 * dt)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_edge() {
        let s = StepSignal::new(0.0, 1.0, 0.5);
        let samples = s.sample(0.01, 100);
        assert!(samples[..50].iter().all(|&v| v == 0.0));
        assert!(samples[50..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_exclusive_edge_switches_after_time() {
        let d = StepSignal::load(0.6, 3.0);
        assert_eq!(d.value_at(3.0), 0.0);
        assert_eq!(d.value_at(3.01), 0.6);
        assert_eq!(d.edge(), Edge::Exclusive);
    }

    #[test]
    fn test_constant() {
        let c = StepSignal::constant(2.5);
        assert!(c.sample(0.1, 20).iter().all(|&v| v == 2.5));
    }

    #[test]
    fn test_sampling_is_reproducible() {
        let s = StepSignal::new(-1.0, 3.0, 1.234);
        assert_eq!(s.sample(0.001, 5000), s.sample(0.001, 5000));
    }
}
