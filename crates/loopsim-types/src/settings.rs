//! Plant, controller and signal settings.

use serde::{Deserialize, Serialize};

/// Step signal: `before` until `at`, then `after`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSettings {
    #[serde(default)]
    pub before: f64,

    pub after: f64,

    /// Switch time [s]
    pub at: f64,
}

impl StepSettings {
    /// Unit step at t = 0.5 s
    pub fn unit() -> Self {
        Self {
            before: 0.0,
            after: 1.0,
            at: 0.5,
        }
    }
}

impl Default for StepSettings {
    fn default() -> Self {
        Self::unit()
    }
}

/// Additive load disturbance switched on strictly after `at`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisturbanceSettings {
    pub magnitude: f64,

    /// Switch-on time [s]
    pub at: f64,
}

/// Time grid and input signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSettings {
    /// Time step [s]
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Simulation horizon [s]
    pub horizon: f64,

    /// Reference step
    #[serde(default)]
    pub reference: StepSettings,

    /// Optional load disturbance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disturbance: Option<DisturbanceSettings>,
}

fn default_dt() -> f64 {
    0.01
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            horizon: 6.0,
            reference: StepSettings::unit(),
            disturbance: None,
        }
    }
}

/// Second-order plant `x'' + 2*zeta*wn*x' + wn^2*x = K*u + d`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantSettings {
    /// Natural frequency wn [rad/s]
    pub natural_frequency: f64,

    /// Damping ratio zeta
    pub damping_ratio: f64,

    /// Input gain K
    pub gain: f64,
}

impl Default for PlantSettings {
    fn default() -> Self {
        Self {
            natural_frequency: 3.0,
            damping_ratio: 0.25,
            gain: 1.0,
        }
    }
}

/// Controller variant and gains
///
/// Serialized with a `type` tag: `{"type": "pi", "kp": 5.0, "ki": 1.5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControllerSettings {
    P { kp: f64 },
    Pi { kp: f64, ki: f64 },
    /// `kd` multiplies the plant velocity, not the error derivative
    Pid { kp: f64, ki: f64, kd: f64 },
}

impl ControllerSettings {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerSettings::P { .. } => "P",
            ControllerSettings::Pi { .. } => "PI",
            ControllerSettings::Pid { .. } => "PID",
        }
    }
}

/// One labelled configuration under comparison
///
/// A missing `plant` falls back to the experiment's shared plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopSettings {
    pub label: String,

    pub controller: ControllerSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant: Option<PlantSettings>,
}

impl LoopSettings {
    pub fn new(label: impl Into<String>, controller: ControllerSettings) -> Self {
        Self {
            label: label.into(),
            controller,
            plant: None,
        }
    }

    pub fn with_plant(mut self, plant: PlantSettings) -> Self {
        self.plant = Some(plant);
        self
    }
}
