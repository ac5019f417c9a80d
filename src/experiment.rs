//! Building and running experiments from settings

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::{debug, info};
use loopsim_core::{
    Comparator, Comparison, ConfigError, Controller, LoopConfig, Scenario, SecondOrderPlant,
    StepMetrics, StepSignal,
};
use loopsim_types::{ControllerSettings, ExperimentSettings, PlantSettings, ScenarioSettings};

use crate::error::Result;

pub fn plant(settings: &PlantSettings) -> SecondOrderPlant {
    SecondOrderPlant::new(
        settings.natural_frequency,
        settings.damping_ratio,
        settings.gain,
    )
}

pub fn controller(settings: &ControllerSettings) -> Controller {
    match *settings {
        ControllerSettings::P { kp } => Controller::p(kp),
        ControllerSettings::Pi { kp, ki } => Controller::pi(kp, ki),
        ControllerSettings::Pid { kp, ki, kd } => Controller::pid(kp, ki, kd),
    }
}

/// Sample the reference and disturbance steps on the scenario grid
pub fn scenario(settings: &ScenarioSettings) -> Result<Scenario, ConfigError> {
    let reference = StepSignal::new(
        settings.reference.before,
        settings.reference.after,
        settings.reference.at,
    );
    let disturbance = settings
        .disturbance
        .map(|d| StepSignal::load(d.magnitude, d.at));
    Scenario::step_response(settings.dt, settings.horizon, reference, disturbance)
}

/// Validated experiment, ready to run
#[derive(Debug, Clone)]
pub struct Experiment {
    pub name: String,
    pub title: String,
    scenario: Scenario,
    configs: Vec<LoopConfig>,
}

impl Experiment {
    /// Validate settings and build the scenario
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an invalid time grid. Duplicate loop
    /// labels are reported by [`Experiment::run`].
    pub fn from_settings(settings: &ExperimentSettings) -> Result<Self, ConfigError> {
        let scenario = scenario(&settings.scenario)?;
        let configs = settings
            .loops
            .iter()
            .map(|l| {
                LoopConfig::new(
                    l.label.clone(),
                    plant(&settings.plant_for(l)),
                    controller(&l.controller),
                )
            })
            .collect();

        Ok(Self {
            name: settings.name.clone(),
            title: settings.title.clone(),
            scenario,
            configs,
        })
    }

    /// Load an experiment file (JSON)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading experiment from {}", path.display());
        let json = fs::read_to_string(path)?;
        let settings = ExperimentSettings::from_json(&json)?;
        Ok(Self::from_settings(&settings)?)
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn configs(&self) -> &[LoopConfig] {
        &self.configs
    }

    /// Run every loop, optionally one thread per loop
    pub fn run(&self, parallel: bool) -> Result<Report, ConfigError> {
        info!(
            "running {} ({} loops, {} samples)",
            self.name,
            self.configs.len(),
            self.scenario.len()
        );

        let mut comparator = Comparator::new(&self.scenario);
        for config in &self.configs {
            comparator.add(config.clone());
        }
        let comparison = if parallel {
            comparator.run_parallel()?
        } else {
            comparator.run()?
        };

        let metrics = comparison
            .iter()
            .map(|(label, trajectory)| {
                (
                    label.to_string(),
                    StepMetrics::for_scenario(trajectory, &self.scenario),
                )
            })
            .collect();

        Ok(Report {
            name: self.name.clone(),
            title: self.title.clone(),
            comparison,
            metrics,
        })
    }
}

/// Result of one experiment run
#[derive(Debug, Clone)]
pub struct Report {
    pub name: String,
    pub title: String,
    pub comparison: Comparison,
    pub metrics: Vec<(String, Option<StepMetrics>)>,
}

impl Report {
    pub fn metrics_for(&self, label: &str) -> Option<&StepMetrics> {
        self.metrics
            .iter()
            .find(|(l, _)| l == label)
            .and_then(|(_, m)| m.as_ref())
    }

    /// Write the comparison as CSV
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        self.comparison.save_csv(path)?;
        Ok(())
    }

    /// Fixed-width table of step metrics, one row per loop
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let heading = if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        };
        let _ = writeln!(out, "{heading}");
        let _ = writeln!(
            out,
            "{:<14} {:>10} {:>10} {:>10} {:>11} {:>10}",
            "Loop", "Final", "SS error", "Peak", "Overshoot", "Settling"
        );
        let _ = writeln!(
            out,
            "{:-<14} {:-<10} {:-<10} {:-<10} {:-<11} {:-<10}",
            "", "", "", "", "", ""
        );

        for (label, metrics) in &self.metrics {
            match metrics {
                Some(m) => {
                    let settling = m
                        .settling_time
                        .map(|t| format!("{t:.2} s"))
                        .unwrap_or_else(|| "-".to_string());
                    let _ = writeln!(
                        out,
                        "{:<14} {:>10.4} {:>10.4} {:>10.4} {:>10.1}% {:>10}",
                        label,
                        m.final_value,
                        m.steady_state_error,
                        m.peak,
                        m.overshoot_percent,
                        settling
                    );
                }
                None => {
                    let _ = writeln!(out, "{label:<14} (no step in reference)");
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopsim_types::{LoopSettings, StepSettings};

    #[test]
    fn test_controller_mapping() {
        assert_eq!(controller(&ControllerSettings::P { kp: 2.0 }), Controller::p(2.0));
        assert_eq!(
            controller(&ControllerSettings::Pid {
                kp: 1.0,
                ki: 2.0,
                kd: 3.0
            }),
            Controller::pid(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_default_plant_settings_match_core() {
        assert_eq!(plant(&PlantSettings::default()), SecondOrderPlant::default());
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let settings = ExperimentSettings::new(
            "bad",
            ScenarioSettings {
                dt: 0.0,
                ..ScenarioSettings::default()
            },
        );
        let err = Experiment::from_settings(&settings).unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimestep(0.0));
    }

    #[test]
    fn test_constant_reference_has_no_metrics() {
        let settings = ExperimentSettings::new(
            "flat",
            ScenarioSettings {
                reference: StepSettings {
                    before: 0.0,
                    after: 0.0,
                    at: 0.5,
                },
                horizon: 1.0,
                ..ScenarioSettings::default()
            },
        )
        .with_loop(LoopSettings::new("P", ControllerSettings::P { kp: 1.0 }));

        let report = Experiment::from_settings(&settings).unwrap().run(false).unwrap();
        assert!(report.metrics_for("P").is_none());
        assert!(report.summary().contains("no step in reference"));
    }
}
