//! # lakesim-hydro
//!
//! Calibrated hydraulic model of a lake basin.
//!
//! Surface area is a quartic in absolute water elevation fitted to one basin;
//! volume is its analytic integral above a reference elevation, and solute
//! concentration follows from volume and dissolved mass. A linear calibration
//! maps surface area to calendar year, and bisection inverts the quartic to
//! recover the elevation for a year.
//!
//! Every query is a pure function of its inputs and the read-only
//! [`Calibration`]; nothing is cached between calls.
//!
//! ## Example
//!
//! ```
//! use lakesim_hydro::{Calibration, HydraulicModel, YearElevationSolver};
//!
//! let calibration = Calibration::default();
//! let model = HydraulicModel::new(calibration);
//! let solver = YearElevationSolver::new(calibration);
//!
//! let elevation = solver.elevation_from_year(2023.0);
//! let sample = model.sample(elevation, 1_000.0);
//! assert_eq!(sample.estimated_year, Some(2023));
//! assert!(sample.concentration_mg_l > 0.0);
//! ```

mod calibration;
mod error;
mod model;
mod sample;
mod solver;

pub use calibration::{Calibration, M2_PER_KM2};
pub use error::HydroError;
pub use model::{concentration, validate_mass, HydraulicModel, MIN_CONCENTRATION_VOLUME_M3};
pub use sample::HydraulicSample;
pub use solver::{
    YearElevationSolver, AREA_TOLERANCE_M2, MAX_SEARCH_ITERATIONS, MIN_TARGET_AREA_M2,
};

/// Result type for hydraulic model operations.
pub type Result<T> = std::result::Result<T, HydroError>;
