//! loopsim-core - discrete-time closed-loop simulation
//!
//! A second-order plant driven by a P, PI or PID controller, subjected to a
//! step reference and an optional additive load disturbance, stepped with a
//! fixed timestep and compared across gain sets.
//!
//! # Architecture
//!
//! - [`SecondOrderPlant`]: semi-implicit Euler step of `x'' + 2*zeta*wn*x' + wn^2*x = K*u + d`
//! - [`Controller`]: tagged union over [`P`], [`PI`] and [`PID`] with explicit [`ControllerState`]
//! - [`Scenario`]: validated time grid with reference and disturbance sequences
//! - [`Simulation`]: the fixed-step loop, producing a [`Trajectory`]
//! - [`Comparator`]: one run per configuration on a shared time axis
//!
//! # Example
//!
//! ```rust
//! use loopsim_core::*;
//!
//! let scenario = Scenario::step_response(
//!     0.01,
//!     8.0,
//!     StepSignal::unit(),
//!     Some(StepSignal::load(0.6, 3.0)),
//! )
//! .unwrap();
//! let plant = SecondOrderPlant::new(3.0, 0.25, 1.0);
//!
//! let comparison = Comparator::new(&scenario)
//!     .with("P control", plant, Controller::p(5.0))
//!     .with("PI control", plant, Controller::pi(5.0, 1.5))
//!     .run()
//!     .unwrap();
//!
//! for (label, trajectory) in comparison.iter() {
//!     println!("{label}: {:?}", trajectory.final_value());
//! }
//! ```

pub mod comparator;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod plant;
pub mod scenario;
pub mod signal;
pub mod simulation;
pub mod trajectory;
pub mod utils;

pub use comparator::{Comparator, Comparison, LoopConfig};
pub use controller::{Controller, ControllerKind, ControllerState, P, PI, PID};
pub use error::ConfigError;
pub use metrics::StepMetrics;
pub use plant::{PlantState, SecondOrderPlant};
pub use scenario::{sample_count, Scenario};
pub use signal::{Edge, StepSignal};
pub use simulation::{simulate, Simulation, StepRecord, Trace};
pub use trajectory::Trajectory;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::comparator::{Comparator, Comparison, LoopConfig};
    pub use crate::controller::{Controller, ControllerKind, ControllerState, P, PI, PID};
    pub use crate::error::ConfigError;
    pub use crate::metrics::StepMetrics;
    pub use crate::plant::{PlantState, SecondOrderPlant};
    pub use crate::scenario::Scenario;
    pub use crate::signal::{Edge, StepSignal};
    pub use crate::simulation::{simulate, Simulation, Trace};
    pub use crate::trajectory::Trajectory;
}
