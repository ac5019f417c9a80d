//! loopsim - closed-loop step response demonstrations
//!
//! Compares P, PI and PID control of a second-order plant on a step
//! reference, optionally with a load disturbance, and exports the resulting
//! time series for plotting or animation by external tools.
//!
//! # Crates
//!
//! - [`loopsim_core`]: plant, controllers, scenario, simulation loop, comparator
//! - [`loopsim_types`]: serializable experiment settings
//!
//! This crate ties them together: settings become validated
//! [`Experiment`]s, the control demonstrations are available as
//! [`demos`] presets, and the `loopsim` binary runs them from the command line.
//!
//! # Example
//!
//! ```rust
//! use loopsim::{demos, Experiment};
//!
//! let experiment = Experiment::from_settings(&demos::pi_disturbance()).unwrap();
//! let report = experiment.run(false).unwrap();
//!
//! let p = report.metrics_for("P control").unwrap();
//! assert!(p.steady_state_error > 0.0);
//! println!("{}", report.summary());
//! ```

pub mod demos;
pub mod error;
pub mod experiment;

pub use error::{Error, Result};
pub use experiment::{Experiment, Report};
pub use loopsim_core as core;
pub use loopsim_types as types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::demos;
    pub use crate::error::{Error, Result};
    pub use crate::experiment::{Experiment, Report};
    pub use loopsim_core::prelude::*;
    pub use loopsim_types::*;
}
