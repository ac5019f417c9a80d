//! Second-order plant advanced with semi-implicit Euler

use crate::utils::constants::{
    DEFAULT_DAMPING_RATIO, DEFAULT_NATURAL_FREQUENCY, DEFAULT_PLANT_GAIN,
};

/// Position and velocity of the plant
///
/// The default value is the rest state `(0, 0)` every simulation starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlantState {
    pub position: f64,
    pub velocity: f64,
}

impl PlantState {
    /// Rest initial conditions
    pub const REST: Self = Self {
        position: 0.0,
        velocity: 0.0,
    };
}

/// Second-order linear plant
///
/// # Dynamics
///
/// ```text
/// x'' + 2*zeta*wn*x' + wn^2*x = K*u + d
/// ```
///
/// where `u` is the control signal and `d` an additive disturbance. The
/// observed output is the position `x`.
///
/// # Integration
///
/// One step uses semi-implicit (symplectic) Euler: velocity is updated
/// first and the position update uses the new velocity.
///
/// ```text
/// a  = K*u + d - 2*zeta*wn*v - wn^2*x
/// v' = v + a*dt
/// x' = x + v'*dt
/// ```
///
/// Parameters and `dt` are not validated here. Non-positive `dt`, a
/// negative `wn` or a large `dt*wn` make the recurrence diverge.
///
/// # Example
///
/// ```
/// use loopsim_core::{PlantState, SecondOrderPlant};
///
/// let plant = SecondOrderPlant::new(3.0, 0.25, 1.0);
/// let next = plant.step(PlantState::REST, 1.5, 0.0, 0.01);
/// assert!((next.velocity - 0.015).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderPlant {
    natural_frequency: f64,
    damping_ratio: f64,
    gain: f64,
}

impl Default for SecondOrderPlant {
    /// Lightly damped plant of the demonstrations: `wn = 3`, `zeta = 0.25`, `K = 1`
    fn default() -> Self {
        Self::new(
            DEFAULT_NATURAL_FREQUENCY,
            DEFAULT_DAMPING_RATIO,
            DEFAULT_PLANT_GAIN,
        )
    }
}

impl SecondOrderPlant {
    /// Create plant with natural frequency `wn`, damping ratio `zeta` and input gain `K`
    pub fn new(natural_frequency: f64, damping_ratio: f64, gain: f64) -> Self {
        Self {
            natural_frequency,
            damping_ratio,
            gain,
        }
    }

    pub fn natural_frequency(&self) -> f64 {
        self.natural_frequency
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Acceleration for the given state, control signal and disturbance
    #[inline]
    pub fn acceleration(&self, state: PlantState, control: f64, disturbance: f64) -> f64 {
        let wn = self.natural_frequency;
        self.gain * control + disturbance
            - 2.0 * self.damping_ratio * wn * state.velocity
            - wn * wn * state.position
    }

    /// Apply an already computed acceleration for one step
    #[inline]
    pub fn integrate(&self, state: PlantState, acceleration: f64, dt: f64) -> PlantState {
        let velocity = state.velocity + acceleration * dt;
        let position = state.position + velocity * dt;
        PlantState { position, velocity }
    }

    /// Advance the plant by one step
    #[inline]
    pub fn step(&self, state: PlantState, control: f64, disturbance: f64, dt: f64) -> PlantState {
        let acceleration = self.acceleration(state, control, disturbance);
        self.integrate(state, acceleration, dt)
    }

    /// Steady-state position for constant control and disturbance
    ///
    /// Returns `None` when `wn` is zero (the plant is a double integrator).
    pub fn static_position(&self, control: f64, disturbance: f64) -> Option<f64> {
        let stiffness = self.natural_frequency * self.natural_frequency;
        if stiffness == 0.0 {
            return None;
        }
        Some((self.gain * control + disturbance) / stiffness)
    }
}
