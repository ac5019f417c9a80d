//! Side-by-side comparison of several loop configurations

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::Path;
use std::thread;

use log::{debug, trace};

use crate::controller::Controller;
use crate::error::ConfigError;
use crate::plant::SecondOrderPlant;
use crate::scenario::Scenario;
use crate::simulation::simulate;
use crate::trajectory::{csv_path, Trajectory, TIME_HEADER};

/// One labelled plant/controller pair under test
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    pub label: String,
    pub plant: SecondOrderPlant,
    pub controller: Controller,
}

impl LoopConfig {
    pub fn new(label: impl Into<String>, plant: SecondOrderPlant, controller: Controller) -> Self {
        Self {
            label: label.into(),
            plant,
            controller,
        }
    }
}

/// Runs every configuration against one shared scenario
///
/// # Example
///
/// ```
/// use loopsim_core::{Comparator, Controller, Scenario, SecondOrderPlant, StepSignal};
///
/// let scenario = Scenario::step_response(0.01, 6.0, StepSignal::unit(), None).unwrap();
/// let plant = SecondOrderPlant::new(3.0, 0.25, 1.0);
///
/// let comparison = Comparator::new(&scenario)
///     .with("Kp low", plant, Controller::p(1.5))
///     .with("Kp high", plant, Controller::p(12.0))
///     .run()
///     .unwrap();
///
/// assert_eq!(comparison.len(), 2);
/// assert_eq!(comparison["Kp low"].len(), comparison["Kp high"].len());
/// ```
#[derive(Debug, Clone)]
pub struct Comparator<'a> {
    scenario: &'a Scenario,
    configs: Vec<LoopConfig>,
}

impl<'a> Comparator<'a> {
    pub fn new(scenario: &'a Scenario) -> Self {
        Self {
            scenario,
            configs: Vec::new(),
        }
    }

    /// Add a configuration (builder style)
    pub fn with(
        mut self,
        label: impl Into<String>,
        plant: SecondOrderPlant,
        controller: Controller,
    ) -> Self {
        self.configs.push(LoopConfig::new(label, plant, controller));
        self
    }

    pub fn add(&mut self, config: LoopConfig) {
        self.configs.push(config);
    }

    pub fn configs(&self) -> &[LoopConfig] {
        &self.configs
    }

    fn check_labels(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for config in &self.configs {
            if !seen.insert(config.label.as_str()) {
                return Err(ConfigError::DuplicateLabel(config.label.clone()));
            }
        }
        Ok(())
    }

    /// Run configurations one after another
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateLabel`] before running anything if
    /// two configurations share a label.
    pub fn run(&self) -> Result<Comparison, ConfigError> {
        self.check_labels()?;
        debug!(
            "comparing {} configurations over {} samples",
            self.configs.len(),
            self.scenario.len()
        );

        let entries = self
            .configs
            .iter()
            .map(|config| {
                let trajectory = simulate(self.scenario, config.plant, config.controller);
                trace!("finished configuration {:?}", config.label);
                (config.label.clone(), trajectory)
            })
            .collect();

        Ok(Comparison::new(self.scenario.time_axis(), entries))
    }

    /// Run each configuration on its own scoped thread
    ///
    /// Produces exactly the same result as [`Comparator::run`], in the same
    /// order. Configurations share nothing mutable, so the threads only
    /// meet at the final join.
    pub fn run_parallel(&self) -> Result<Comparison, ConfigError> {
        self.check_labels()?;
        debug!(
            "comparing {} configurations over {} samples on {} threads",
            self.configs.len(),
            self.scenario.len(),
            self.configs.len()
        );

        let scenario = self.scenario;
        let entries = thread::scope(|scope| {
            let handles: Vec<_> = self
                .configs
                .iter()
                .map(|config| {
                    scope.spawn(move || simulate(scenario, config.plant, config.controller))
                })
                .collect();

            self.configs
                .iter()
                .zip(handles)
                .map(|(config, handle)| {
                    let trajectory = match handle.join() {
                        Ok(trajectory) => trajectory,
                        Err(payload) => std::panic::resume_unwind(payload),
                    };
                    trace!("finished configuration {:?}", config.label);
                    (config.label.clone(), trajectory)
                })
                .collect()
        });

        Ok(Comparison::new(scenario.time_axis(), entries))
    }
}

/// Trajectories of several configurations on one shared time axis
///
/// Entries keep the order in which the configurations were added. Every
/// trajectory has the same length as the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    time: Vec<f64>,
    entries: Vec<(String, Trajectory)>,
}

impl Comparison {
    fn new(time: Vec<f64>, entries: Vec<(String, Trajectory)>) -> Self {
        Self { time, entries }
    }

    /// Shared time axis `t_k = k * dt`
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&Trajectory> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, trajectory)| trajectory)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Trajectory)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t))
    }

    /// Values of every configuration at sample `k`, in entry order
    pub fn row(&self, k: usize) -> Option<Vec<f64>> {
        self.entries.iter().map(|(_, t)| t.get(k)).collect()
    }

    pub fn into_entries(self) -> Vec<(String, Trajectory)> {
        self.entries
    }

    /// Save as CSV with one column per configuration
    pub fn save_csv(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = std::fs::File::create(csv_path(path.as_ref()))?;
        self.write_csv(file)
    }

    /// Write CSV: `time [s]` followed by one column per label
    pub fn write_csv<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec![TIME_HEADER.to_string()];
        header.extend(self.labels().map(str::to_string));
        wtr.write_record(&header)?;

        for (k, t) in self.time.iter().enumerate() {
            let mut record = vec![t.to_string()];
            record.extend(
                self.entries
                    .iter()
                    .map(|(_, trajectory)| trajectory.samples()[k].to_string()),
            );
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl std::ops::Index<&str> for Comparison {
    type Output = Trajectory;

    fn index(&self, label: &str) -> &Trajectory {
        match self.get(label) {
            Some(trajectory) => trajectory,
            None => panic!("no configuration labelled {label:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::StepSignal;

    fn scenario() -> Scenario {
        Scenario::step_response(0.01, 2.0, StepSignal::unit(), None).unwrap()
    }

    fn plant() -> SecondOrderPlant {
        SecondOrderPlant::new(3.0, 0.25, 1.0)
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let scenario = scenario();
        let err = Comparator::new(&scenario)
            .with("a", plant(), Controller::p(1.0))
            .with("a", plant(), Controller::p(2.0))
            .run()
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLabel("a".to_string()));
    }

    #[test]
    fn test_empty_comparison() {
        let scenario = scenario();
        let comparison = Comparator::new(&scenario).run().unwrap();
        assert!(comparison.is_empty());
        assert_eq!(comparison.time().len(), 200);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let scenario = scenario();
        let comparison = Comparator::new(&scenario)
            .with("z", plant(), Controller::p(1.0))
            .with("a", plant(), Controller::pi(1.0, 1.0))
            .with("m", plant(), Controller::pid(1.0, 1.0, 1.0))
            .run()
            .unwrap();
        let labels: Vec<_> = comparison.labels().collect();
        assert_eq!(labels, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_row_and_csv() {
        let scenario = Scenario::step_response(0.5, 1.0, StepSignal::unit(), None).unwrap();
        let comparison = Comparator::new(&scenario)
            .with("P", plant(), Controller::p(1.0))
            .with("PI", plant(), Controller::pi(1.0, 1.0))
            .run()
            .unwrap();

        assert_eq!(comparison.row(0), Some(vec![0.0, 0.0]));
        assert!(comparison.row(2).is_none());

        let mut buffer = Vec::new();
        comparison.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time [s],P,PI");
        assert_eq!(lines[1], "0,0,0");
        assert_eq!(lines.len(), 3);
    }
}
