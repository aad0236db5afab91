//! Errors surfaced by the runner.

use thiserror::Error;

/// Errors that can occur while configuring or running a basin query.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON encoding error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("DEM error: {0}")]
    DemError(#[from] lakesim_dem::DemError),

    #[error("Hydraulic model error: {0}")]
    HydroError(#[from] lakesim_hydro::HydroError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
