//! Error types for the hydraulic model.

use thiserror::Error;

/// Errors raised while building a calibration.
///
/// Queries against a valid calibration are total and never fail.
#[derive(Debug, Error)]
pub enum HydroError {
    /// A calibration value is NaN or infinite.
    #[error("Calibration value `{name}` must be finite, got {value}")]
    NonFinite {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The elevation domain is empty or inverted.
    #[error("Invalid elevation domain [{low}, {high}] (low must be below high)")]
    InvalidDomain {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// A zero slope makes the year calibration non-invertible.
    #[error("Year calibration slope must be non-zero")]
    ZeroYearSlope,

    /// Solute mass must be a non-negative number of tons.
    #[error("Invalid solute mass {0} t (must be finite and >= 0)")]
    InvalidMass(f64),
}
