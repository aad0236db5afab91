//! # lakesim-runner
//!
//! Configuration loading and query plumbing behind the `lakesim` CLI.

pub mod basin;
pub mod config;
mod error;

pub use basin::{Basin, GridSummary, YearQuery};
pub use config::{BasinConfig, DEFAULT_TARGET_MAX_SIZE};
pub use error::RunnerError;
