//! P, PI and PID control laws
//!
//! Each variant is a plain value holding its gains. The integral term is not
//! stored inside the controller: it lives in a [`ControllerState`] that the
//! caller threads through every step call, so two loops running the same
//! controller never share an accumulator.

use crate::plant::PlantState;

/// Accumulated state of a control law
///
/// Only PI and PID use the integral; P returns the state unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerState {
    pub integral: f64,
}

/// Proportional controller
///
/// # Control Law
///
/// u = Kp * e
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct P {
    pub kp: f64,
}

impl P {
    pub fn new(kp: f64) -> Self {
        Self { kp }
    }

    #[inline]
    pub fn step(&self, state: ControllerState, error: f64) -> (f64, ControllerState) {
        (self.kp * error, state)
    }
}

/// Proportional-integral controller
///
/// # Control Law
///
/// ```text
/// I' = I + e * dt
/// u  = Kp * e + Ki * I'
/// ```
///
/// The integral is updated before it is used, and it grows without bound
/// while the error persists (no anti-windup).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PI {
    pub kp: f64,
    pub ki: f64,
}

impl PI {
    pub fn new(kp: f64, ki: f64) -> Self {
        Self { kp, ki }
    }

    #[inline]
    pub fn step(&self, state: ControllerState, error: f64, dt: f64) -> (f64, ControllerState) {
        let integral = state.integral + error * dt;
        (self.kp * error + self.ki * integral, ControllerState { integral })
    }
}

/// PI controller with velocity feedback as its "D" term
///
/// # Control Law
///
/// ```text
/// I' = I + e * dt
/// u  = Kp * e + Ki * I' - Kd * v
/// ```
///
/// `v` is the plant velocity, read directly from the plant. This is not the
/// derivative of the error: for a step reference the two differ at the step
/// instant, and reinterpreting the term changes the simulated response. The
/// coupling is why [`PID::step`] takes `plant_velocity` explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PID {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PID {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    #[inline]
    pub fn step(
        &self,
        state: ControllerState,
        error: f64,
        plant_velocity: f64,
        dt: f64,
    ) -> (f64, ControllerState) {
        let integral = state.integral + error * dt;
        let control = self.kp * error + self.ki * integral - self.kd * plant_velocity;
        (control, ControllerState { integral })
    }
}

/// Which control law a [`Controller`] applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerKind {
    P,
    PI,
    PID,
}

impl ControllerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerKind::P => "P",
            ControllerKind::PI => "PI",
            ControllerKind::PID => "PID",
        }
    }
}

/// Any of the supported control laws behind one step contract
///
/// The simulation loop only sees this type, so it never branches on the
/// variant itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Controller {
    P(P),
    PI(PI),
    PID(PID),
}

impl Controller {
    pub fn p(kp: f64) -> Self {
        Controller::P(P::new(kp))
    }

    pub fn pi(kp: f64, ki: f64) -> Self {
        Controller::PI(PI::new(kp, ki))
    }

    pub fn pid(kp: f64, ki: f64, kd: f64) -> Self {
        Controller::PID(PID::new(kp, ki, kd))
    }

    pub fn kind(&self) -> ControllerKind {
        match self {
            Controller::P(_) => ControllerKind::P,
            Controller::PI(_) => ControllerKind::PI,
            Controller::PID(_) => ControllerKind::PID,
        }
    }

    /// Compute the control signal for one step
    ///
    /// `plant` is the plant state before this step. Only the PID variant
    /// reads it (velocity feedback).
    #[inline]
    pub fn step(
        &self,
        state: ControllerState,
        error: f64,
        plant: PlantState,
        dt: f64,
    ) -> (f64, ControllerState) {
        match self {
            Controller::P(c) => c.step(state, error),
            Controller::PI(c) => c.step(state, error, dt),
            Controller::PID(c) => c.step(state, error, plant.velocity, dt),
        }
    }
}

impl From<P> for Controller {
    fn from(c: P) -> Self {
        Controller::P(c)
    }
}

impl From<PI> for Controller {
    fn from(c: PI) -> Self {
        Controller::PI(c)
    }
}

impl From<PID> for Controller {
    fn from(c: PID) -> Self {
        Controller::PID(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_p_is_stateless() {
        let state = ControllerState { integral: 0.7 };
        let (u, next) = P::new(1.5).step(state, 2.0);
        assert_relative_eq!(u, 3.0, epsilon = 1e-12);
        assert_eq!(next, state);
    }

    #[test]
    fn test_pi_updates_integral_before_use() {
        let pi = PI::new(5.0, 1.5);
        let (u, state) = pi.step(ControllerState::default(), 1.0, 0.01);
        assert_relative_eq!(state.integral, 0.01, epsilon = 1e-15);
        assert_relative_eq!(u, 5.0 + 1.5 * 0.01, epsilon = 1e-12);

        let (u, state) = pi.step(state, 0.5, 0.01);
        assert_relative_eq!(state.integral, 0.015, epsilon = 1e-15);
        assert_relative_eq!(u, 2.5 + 1.5 * 0.015, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_subtracts_velocity_feedback() {
        let pid = PID::new(5.0, 1.5, 1.2);
        let (u, state) = pid.step(ControllerState::default(), 1.0, 0.5, 0.01);
        assert_relative_eq!(state.integral, 0.01, epsilon = 1e-15);
        assert_relative_eq!(u, 5.0 + 0.015 - 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_ignores_error_history() {
        // Same error twice: an error-derivative term would be zero, velocity feedback is not
        let pid = PID::new(0.0, 0.0, 2.0);
        let (u1, s) = pid.step(ControllerState::default(), 1.0, 0.0, 0.01);
        let (u2, _) = pid.step(s, 1.0, 0.25, 0.01);
        assert_eq!(u1, 0.0);
        assert_relative_eq!(u2, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_pid_without_kd_matches_pi() {
        let pi = Controller::pi(5.0, 1.5);
        let pid = Controller::pid(5.0, 1.5, 0.0);
        let plant = PlantState {
            position: 0.2,
            velocity: 0.8,
        };

        let mut s_pi = ControllerState::default();
        let mut s_pid = ControllerState::default();
        for k in 0..10 {
            let e = 1.0 - 0.05 * k as f64;
            let (u_pi, n_pi) = pi.step(s_pi, e, plant, 0.01);
            let (u_pid, n_pid) = pid.step(s_pid, e, plant, 0.01);
            assert_eq!(u_pi, u_pid);
            s_pi = n_pi;
            s_pid = n_pid;
        }
    }

    #[test]
    fn test_integral_is_unbounded() {
        let pi = PI::new(0.0, 1.0);
        let mut state = ControllerState::default();
        for _ in 0..100_000 {
            state = pi.step(state, 10.0, 0.1).1;
        }
        assert_relative_eq!(state.integral, 100_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Controller::p(1.0).kind(), ControllerKind::P);
        assert_eq!(Controller::from(PI::new(1.0, 1.0)).kind(), ControllerKind::PI);
        assert_eq!(Controller::pid(1.0, 1.0, 1.0).kind().as_str(), "PID");
    }
}
