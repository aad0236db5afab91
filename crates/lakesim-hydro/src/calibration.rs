//! Calibration constants for one basin.

use crate::{HydroError, Result};
use serde::{Deserialize, Serialize};

/// Square meters per square kilometer.
pub const M2_PER_KM2: f64 = 1_000_000.0;

/// Basin calibration: area polynomial, year line and elevation domain.
///
/// These are measured constants for a specific lake and are never fitted at
/// runtime. Build one at startup (the default, or loaded from a basin file)
/// and hand copies to [`HydraulicModel`](crate::HydraulicModel) and
/// [`YearElevationSolver`](crate::YearElevationSolver).
///
/// # Example
///
/// ```
/// use lakesim_hydro::Calibration;
///
/// let calibration = Calibration::default();
/// calibration.validate()?;
/// assert_eq!(calibration.domain_low, 4304.0);
/// # Ok::<(), lakesim_hydro::HydroError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Area polynomial coefficients `[C0, C1, C2, C3, C4]`, area in m² for an
    /// absolute elevation in meters.
    pub area_coefficients: [f64; 5],
    /// Year line slope, km² per year.
    pub year_slope: f64,
    /// Year line intercept, km².
    pub year_intercept: f64,
    /// Lowest calibrated elevation; also the zero-volume reference.
    pub domain_low: f64,
    /// Highest calibrated elevation.
    pub domain_high: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            area_coefficients: [
                -39_193_471_560_745_472.0,
                36_253_391_866_272.0,
                -12_573_795_152.0,
                1_937_992.0,
                -112.0,
            ],
            year_slope: 27.84,
            year_intercept: -54_281.6,
            domain_low: 4304.0,
            domain_high: 4340.0,
        }
    }
}

impl Calibration {
    /// Check that every constant is usable.
    pub fn validate(&self) -> Result<()> {
        const NAMES: [&str; 5] = ["C0", "C1", "C2", "C3", "C4"];
        for (name, &value) in NAMES.iter().zip(self.area_coefficients.iter()) {
            check_finite(name, value)?;
        }
        check_finite("year_slope", self.year_slope)?;
        check_finite("year_intercept", self.year_intercept)?;
        check_finite("domain_low", self.domain_low)?;
        check_finite("domain_high", self.domain_high)?;

        if self.domain_low >= self.domain_high {
            return Err(HydroError::InvalidDomain {
                low: self.domain_low,
                high: self.domain_high,
            });
        }
        if self.year_slope == 0.0 {
            return Err(HydroError::ZeroYearSlope);
        }
        Ok(())
    }

    /// The volume reference elevation.
    pub fn reference_elevation(&self) -> f64 {
        self.domain_low
    }

    /// Whether an elevation lies inside the calibrated domain.
    pub fn in_domain(&self, elevation: f64) -> bool {
        elevation >= self.domain_low && elevation <= self.domain_high
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HydroError::NonFinite { name, value })
    }
}
