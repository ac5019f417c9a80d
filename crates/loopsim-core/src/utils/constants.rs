//! Defaults shared by the demonstrations

/// Fixed simulation timestep [s]
pub const DEFAULT_TIMESTEP: f64 = 0.01;

/// Plant natural frequency wn [rad/s]
pub const DEFAULT_NATURAL_FREQUENCY: f64 = 3.0;

/// Plant damping ratio zeta
pub const DEFAULT_DAMPING_RATIO: f64 = 0.25;

/// Plant input gain K
pub const DEFAULT_PLANT_GAIN: f64 = 1.0;

/// Switch time of the reference step [s]
pub const DEFAULT_STEP_TIME: f64 = 0.5;

/// Relative band used for settling time
pub const SETTLING_BAND: f64 = 0.02;
