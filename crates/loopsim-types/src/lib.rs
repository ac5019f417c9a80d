//! Shared settings types for loopsim experiments.
//!
//! This crate holds plain serializable data only:
//! - Plant parameters and controller gains
//! - Reference and disturbance step signals
//! - Experiments comparing several labelled loops on one scenario
//!
//! Turning settings into runnable simulations is done by the `loopsim` crate.

mod experiment;
mod settings;

pub use experiment::*;
pub use settings::*;
