//! Year ↔ area ↔ elevation conversions.

use crate::calibration::{Calibration, M2_PER_KM2};
use crate::model::HydraulicModel;
use tracing::{debug, trace};

/// Iteration budget for the elevation search.
pub const MAX_SEARCH_ITERATIONS: usize = 64;

/// Area tolerance (m²) that ends the elevation search early.
///
/// Sized against the magnitude of the polynomial rather than any physical
/// measurement accuracy.
pub const AREA_TOLERANCE_M2: f64 = 1.0;

/// Target areas at or below this (m²) resolve to the bottom of the domain.
pub const MIN_TARGET_AREA_M2: f64 = 1.0;

/// Maps between calendar year, surface area and water elevation.
///
/// Year and area are related by the calibrated line
/// `area_km2 = slope * year + intercept`, which inverts exactly. Elevation
/// from area inverts the quartic by bisection over the calibration domain.
///
/// The bisection assumes area does not decrease with elevation inside the
/// domain. That holds for the shipped basin constants but is a property of
/// the calibration, not of quartics in general; a calibration that violates
/// it gets a midpoint answer without any error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearElevationSolver {
    model: HydraulicModel,
}

impl YearElevationSolver {
    /// Create a solver over a calibration.
    pub fn new(calibration: Calibration) -> Self {
        Self {
            model: HydraulicModel::new(calibration),
        }
    }

    fn calibration(&self) -> &Calibration {
        self.model.calibration()
    }

    /// Fractional year for a surface area in m².
    pub fn year_from_area(&self, area_m2: f64) -> f64 {
        let c = self.calibration();
        (area_m2 / M2_PER_KM2 - c.year_intercept) / c.year_slope
    }

    /// Rounded year for a surface area, `None` when the lake is dry.
    pub fn estimated_year(&self, area_m2: f64) -> Option<i32> {
        if area_m2 > 0.0 {
            Some(self.year_from_area(area_m2).round() as i32)
        } else {
            None
        }
    }

    /// Surface area in m² implied by a year, floored at 0.
    pub fn area_from_year(&self, year: f64) -> f64 {
        let c = self.calibration();
        (c.year_slope * year + c.year_intercept).max(0.0) * M2_PER_KM2
    }

    /// Elevation whose area matches `target_m2`.
    ///
    /// Bisects `[domain_low, domain_high]` for at most
    /// [`MAX_SEARCH_ITERATIONS`] steps, stopping early once the area is within
    /// [`AREA_TOLERANCE_M2`]. Always returns an elevation inside the domain.
    pub fn elevation_from_area(&self, target_m2: f64) -> f64 {
        let c = self.calibration();
        if target_m2 <= MIN_TARGET_AREA_M2 {
            return c.domain_low;
        }

        let mut low = c.domain_low;
        let mut high = c.domain_high;
        for iteration in 0..MAX_SEARCH_ITERATIONS {
            let mid = 0.5 * (low + high);
            let area = self.model.area_at(mid);
            trace!(iteration, low, high, mid, area, "elevation search");

            if (area - target_m2).abs() < AREA_TOLERANCE_M2 {
                debug!(target_m2, elevation = mid, iterations = iteration + 1, "elevation search converged");
                return mid;
            }
            if area < target_m2 {
                low = mid;
            } else {
                high = mid;
            }
        }

        let mid = 0.5 * (low + high);
        debug!(target_m2, elevation = mid, "elevation search exhausted iteration budget");
        mid
    }

    /// Elevation matching the area the year line predicts for `year`.
    pub fn elevation_from_year(&self, year: f64) -> f64 {
        self.elevation_from_area(self.area_from_year(year))
    }
}

impl Default for YearElevationSolver {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}
