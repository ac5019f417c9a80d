//! Fixed-step closed-loop simulation
//!
//! One step of the loop:
//!
//! ```text
//! e_k        = reference[k] - x
//! (u_k, c')  = controller.step(c, e_k, plant_state, dt)
//! plant'     = plant.step(plant_state, u_k, disturbance[k], dt)
//! record x'
//! ```
//!
//! Every step consumes the state produced by the previous one, so the steps
//! of a single run are strictly ordered. Plant and controller state are
//! created at rest for each run and never leave it; only the recorded
//! [`Trajectory`] (or [`Trace`]) does.
//!
//! The explicit recurrence is only conditionally stable. A large `dt * wn`
//! or very high gains make the output grow without bound or turn
//! non-finite. This is not detected as an error; a warning is logged when a
//! run ends with a non-finite sample.

use std::io::{self, Write};
use std::path::Path;

use log::{debug, warn};

use crate::controller::{Controller, ControllerState};
use crate::plant::{PlantState, SecondOrderPlant};
use crate::scenario::Scenario;
use crate::trajectory::{csv_path, Trajectory, TIME_HEADER};

/// Everything computed during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub time: f64,
    pub reference: f64,
    pub disturbance: f64,
    pub error: f64,
    pub control: f64,
    pub acceleration: f64,
    /// Plant state after the step
    pub plant: PlantState,
}

/// Closed loop of one plant and one controller driven by a scenario
///
/// # Example
///
/// ```
/// use loopsim_core::{Controller, Scenario, SecondOrderPlant, Simulation, StepSignal};
///
/// let scenario = Scenario::step_response(0.01, 6.0, StepSignal::unit(), None).unwrap();
/// let plant = SecondOrderPlant::new(3.0, 0.25, 1.0);
///
/// let trajectory = Simulation::new(&scenario, plant, Controller::p(1.5)).run();
/// assert_eq!(trajectory.len(), scenario.len());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    scenario: &'a Scenario,
    plant: SecondOrderPlant,
    controller: Controller,
    plant_state: PlantState,
    controller_state: ControllerState,
    index: usize,
}

impl<'a> Simulation<'a> {
    /// Create loop at rest, positioned before sample 0
    pub fn new(scenario: &'a Scenario, plant: SecondOrderPlant, controller: Controller) -> Self {
        Self {
            scenario,
            plant,
            controller,
            plant_state: PlantState::REST,
            controller_state: ControllerState::default(),
            index: 0,
        }
    }

    pub fn scenario(&self) -> &Scenario {
        self.scenario
    }

    pub fn plant(&self) -> &SecondOrderPlant {
        &self.plant
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Index of the next step to execute
    pub fn index(&self) -> usize {
        self.index
    }

    /// Time of the next step to execute
    pub fn time(&self) -> f64 {
        self.scenario.time_at(self.index)
    }

    pub fn plant_state(&self) -> PlantState {
        self.plant_state
    }

    pub fn controller_state(&self) -> ControllerState {
        self.controller_state
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.scenario.len()
    }

    /// Execute the next step
    ///
    /// Returns `None` once all `N` samples have been produced.
    pub fn step(&mut self) -> Option<StepRecord> {
        let k = self.index;
        let reference = *self.scenario.reference().get(k)?;
        let disturbance = self.scenario.disturbance()[k];
        let dt = self.scenario.dt();

        let error = reference - self.plant_state.position;
        let (control, controller_state) =
            self.controller
                .step(self.controller_state, error, self.plant_state, dt);
        let acceleration = self
            .plant
            .acceleration(self.plant_state, control, disturbance);
        let plant_state = self.plant.integrate(self.plant_state, acceleration, dt);

        self.controller_state = controller_state;
        self.plant_state = plant_state;
        self.index += 1;

        Some(StepRecord {
            time: self.scenario.time_at(k),
            reference,
            disturbance,
            error,
            control,
            acceleration,
            plant: plant_state,
        })
    }

    /// Run the remaining steps and return the position trajectory
    pub fn run(mut self) -> Trajectory {
        let n = self.scenario.len();
        debug!(
            "simulating {:?} loop: {} steps, dt = {}",
            self.controller.kind(),
            n - self.index.min(n),
            self.scenario.dt()
        );

        let mut samples = Vec::with_capacity(n);
        while let Some(record) = self.step() {
            samples.push(record.plant.position);
        }

        let trajectory = Trajectory::new(self.scenario.dt(), samples);
        if !trajectory.is_finite() {
            warn!(
                "{:?} loop diverged to a non-finite output; reduce dt or the gains",
                self.controller.kind()
            );
        }
        trajectory
    }

    /// Run the remaining steps and record every intermediate signal
    pub fn run_traced(mut self) -> Trace {
        let mut records = Vec::with_capacity(self.scenario.len());
        while let Some(record) = self.step() {
            records.push(record);
        }
        Trace {
            dt: self.scenario.dt(),
            records,
        }
    }
}

/// Run one closed loop over the whole scenario
pub fn simulate(scenario: &Scenario, plant: SecondOrderPlant, controller: Controller) -> Trajectory {
    Simulation::new(scenario, plant, controller).run()
}

/// Per-step signals of a full run
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    dt: f64,
    records: Vec<StepRecord>,
}

impl Trace {
    const HEADER: [&'static str; 8] = [
        TIME_HEADER,
        "reference",
        "disturbance",
        "error",
        "control",
        "acceleration",
        "velocity",
        "position",
    ];

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, k: usize) -> Option<&StepRecord> {
        self.records.get(k)
    }

    /// Position column as a trajectory
    pub fn trajectory(&self) -> Trajectory {
        Trajectory::new(
            self.dt,
            self.records.iter().map(|r| r.plant.position).collect(),
        )
    }

    pub fn control(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.control).collect()
    }

    pub fn save_csv(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = std::fs::File::create(csv_path(path.as_ref()))?;
        self.write_csv(file)
    }

    /// Write all channels, one row per step
    pub fn write_csv<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(Self::HEADER)?;
        for r in &self.records {
            wtr.write_record([
                r.time.to_string(),
                r.reference.to_string(),
                r.disturbance.to_string(),
                r.error.to_string(),
                r.control.to_string(),
                r.acceleration.to_string(),
                r.plant.velocity.to_string(),
                r.plant.position.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
