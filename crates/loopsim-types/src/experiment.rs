//! Experiment description: one scenario, several loop configurations.

use serde::{Deserialize, Serialize};

use crate::{LoopSettings, PlantSettings, ScenarioSettings};

/// A complete comparison experiment
///
/// # Examples
///
/// ```
/// use loopsim_types::ExperimentSettings;
///
/// let json = r#"{
///     "name": "p-vs-pi",
///     "scenario": { "horizon": 8.0, "disturbance": { "magnitude": 0.6, "at": 3.0 } },
///     "loops": [
///         { "label": "P control", "controller": { "type": "p", "kp": 5.0 } },
///         { "label": "PI control", "controller": { "type": "pi", "kp": 5.0, "ki": 1.5 } }
///     ]
/// }"#;
///
/// let experiment = ExperimentSettings::from_json(json).unwrap();
/// assert_eq!(experiment.loops.len(), 2);
/// assert_eq!(experiment.plant.natural_frequency, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSettings {
    /// Human-readable identifier
    pub name: String,

    /// Optional one-line description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    pub scenario: ScenarioSettings,

    /// Plant shared by every loop that does not override it
    #[serde(default)]
    pub plant: PlantSettings,

    pub loops: Vec<LoopSettings>,
}

impl ExperimentSettings {
    pub fn new(name: impl Into<String>, scenario: ScenarioSettings) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            scenario,
            plant: PlantSettings::default(),
            loops: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_plant(mut self, plant: PlantSettings) -> Self {
        self.plant = plant;
        self
    }

    pub fn with_loop(mut self, settings: LoopSettings) -> Self {
        self.loops.push(settings);
        self
    }

    /// Plant used by the given loop
    pub fn plant_for(&self, settings: &LoopSettings) -> PlantSettings {
        settings.plant.unwrap_or(self.plant)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
