//! `lakesim` command-line interface.

use clap::{Parser, Subcommand};
use lakesim_runner::{Basin, BasinConfig, RunnerError};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lakesim", version, about = "Lake basin area, volume and concentration model")]
struct Cli {
    /// Basin YAML file (defaults to the built-in basin)
    #[arg(short, long, global = true)]
    basin: Option<PathBuf>,

    /// Compact single-line JSON output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lake state at an absolute water elevation
    Sample {
        /// Water elevation in meters
        #[arg(short, long)]
        elevation: f64,

        /// Dissolved solute mass in tons
        #[arg(short, long, default_value_t = 0.0)]
        mass: f64,
    },

    /// Lake state for a calendar year
    Year {
        /// Calendar year (fractional years allowed)
        #[arg(short, long)]
        year: f64,

        /// Dissolved solute mass in tons
        #[arg(short, long, default_value_t = 0.0)]
        mass: f64,
    },

    /// Samples across the calibrated elevation domain
    Sweep {
        /// Number of intervals
        #[arg(short, long, default_value_t = 36)]
        steps: usize,

        /// Dissolved solute mass in tons
        #[arg(short, long, default_value_t = 0.0)]
        mass: f64,
    },

    /// Summarize the terrain grid
    Grid {
        /// GeoTIFF elevation raster; synthetic terrain when omitted
        #[arg(short, long)]
        dem: Option<PathBuf>,

        /// Largest grid side after downsampling
        #[arg(long)]
        max_size: Option<usize>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunnerError> {
    let config = match &cli.basin {
        Some(path) => BasinConfig::load(path)?,
        None => BasinConfig::default(),
    };
    let basin = Basin::new(config)?;

    match cli.command {
        Command::Sample { elevation, mass } => {
            emit(&basin.sample_at_elevation(elevation, mass)?, cli.compact)
        }
        Command::Year { year, mass } => emit(&basin.sample_for_year(year, mass)?, cli.compact),
        Command::Sweep { steps, mass } => emit(&basin.sweep(steps, mass)?, cli.compact),
        Command::Grid { dem, max_size } => {
            emit(&basin.grid_summary(dem.as_deref(), max_size)?, cli.compact)
        }
    }
}

fn emit<T: Serialize>(value: &T, compact: bool) -> Result<(), RunnerError> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
