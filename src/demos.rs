//! The control demonstrations as ready-made experiments
//!
//! Every preset uses the same plant (`wn = 3`, `zeta = 0.25`, `K = 1`), a
//! 10 ms step and a unit reference step at 0.5 s.

use loopsim_core::utils::constants::DEFAULT_TIMESTEP;
use loopsim_types::{
    ControllerSettings, DisturbanceSettings, ExperimentSettings, LoopSettings, ScenarioSettings,
    StepSettings,
};

use crate::error::{Error, Result};

/// Preset names accepted by [`by_name`]
pub const NAMES: [&str; 3] = ["p-step", "pi-disturbance", "pid-damping"];

fn scenario(horizon: f64) -> ScenarioSettings {
    ScenarioSettings {
        dt: DEFAULT_TIMESTEP,
        horizon,
        reference: StepSettings::unit(),
        disturbance: None,
    }
}

/// P-only step response for three proportional gains
pub fn p_step() -> ExperimentSettings {
    ExperimentSettings::new("p-step", scenario(6.0))
        .with_title("P control step response")
        .with_loop(LoopSettings::new("Kp low", ControllerSettings::P { kp: 1.5 }))
        .with_loop(LoopSettings::new("Kp typ", ControllerSettings::P { kp: 5.0 }))
        .with_loop(LoopSettings::new("Kp high", ControllerSettings::P { kp: 12.0 }))
}

/// P against PI with a load disturbance switched on after 3 s
pub fn pi_disturbance() -> ExperimentSettings {
    let scenario = ScenarioSettings {
        disturbance: Some(DisturbanceSettings {
            magnitude: 0.6,
            at: 3.0,
        }),
        ..scenario(8.0)
    };

    ExperimentSettings::new("pi-disturbance", scenario)
        .with_title("P vs PI control (step + disturbance)")
        .with_loop(LoopSettings::new("P control", ControllerSettings::P { kp: 5.0 }))
        .with_loop(LoopSettings::new(
            "PI control",
            ControllerSettings::Pi { kp: 5.0, ki: 1.5 },
        ))
}

/// PI against PID, where the D term is velocity feedback
pub fn pid_damping() -> ExperimentSettings {
    ExperimentSettings::new("pid-damping", scenario(6.0))
        .with_title("PI vs PID (D suppresses oscillation)")
        .with_loop(LoopSettings::new("PI", ControllerSettings::Pi { kp: 5.0, ki: 1.5 }))
        .with_loop(LoopSettings::new(
            "PID",
            ControllerSettings::Pid {
                kp: 5.0,
                ki: 1.5,
                kd: 1.2,
            },
        ))
}

/// All presets, in [`NAMES`] order
pub fn all() -> Vec<ExperimentSettings> {
    vec![p_step(), pi_disturbance(), pid_damping()]
}

/// Look up a preset by name
pub fn by_name(name: &str) -> Result<ExperimentSettings> {
    match name {
        "p-step" => Ok(p_step()),
        "pi-disturbance" => Ok(pi_disturbance()),
        "pid-damping" => Ok(pid_damping()),
        _ => Err(Error::UnknownDemo {
            name: name.to_string(),
            available: NAMES.join(", "),
        }),
    }
}
