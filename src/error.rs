//! Errors surfaced by the experiment runner and command-line front end

use std::io;

use loopsim_core::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid experiment file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown demo {name:?} (available: {available})")]
    UnknownDemo { name: String, available: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
