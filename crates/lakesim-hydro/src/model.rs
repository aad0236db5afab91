//! Area, volume and concentration from the calibrated area polynomial.

use crate::calibration::Calibration;
use crate::sample::HydraulicSample;
use crate::solver::YearElevationSolver;
use crate::{HydroError, Result};
use tracing::trace;

/// Volumes at or below this many cubic meters yield zero concentration.
pub const MIN_CONCENTRATION_VOLUME_M3: f64 = 0.001;

/// Grams per metric ton.
const GRAMS_PER_TON: f64 = 1_000_000.0;

/// Solute concentration in mg/L for `mass_tons` dissolved in `volume_m3`.
///
/// mg/L and g/m³ are numerically identical, so this is grams over cubic
/// meters. Returns 0 for volumes at or below [`MIN_CONCENTRATION_VOLUME_M3`].
pub fn concentration(volume_m3: f64, mass_tons: f64) -> f64 {
    if volume_m3 > MIN_CONCENTRATION_VOLUME_M3 {
        mass_tons * GRAMS_PER_TON / volume_m3
    } else {
        0.0
    }
}

/// Validate a caller-supplied solute mass.
pub fn validate_mass(mass_tons: f64) -> Result<f64> {
    if mass_tons.is_finite() && mass_tons >= 0.0 {
        Ok(mass_tons)
    } else {
        Err(HydroError::InvalidMass(mass_tons))
    }
}

/// Surface area and volume as functions of absolute water elevation.
///
/// The quartic is only meaningful inside the calibration domain; outside it
/// the raw polynomial may go negative, so [`area_at`](Self::area_at) clamps.
///
/// Absolute-elevation coefficients are large and alternate in sign, so the
/// model evaluates a copy re-centered on `domain_low`. Only the offset from
/// the reference enters the powers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydraulicModel {
    calibration: Calibration,
    /// Coefficients in `u = elevation - domain_low`, constant term first.
    shifted: [f64; 5],
}

/// Taylor shift: coefficients of `p(u + origin)` in powers of `u`.
///
/// Repeated synthetic division; the first pass is exactly Horner's `p(origin)`.
fn shift_coefficients(coefficients: [f64; 5], origin: f64) -> [f64; 5] {
    let mut b = coefficients;
    let n = b.len() - 1;
    for k in 0..n {
        for j in (k..n).rev() {
            b[j] += origin * b[j + 1];
        }
    }
    b
}

impl HydraulicModel {
    /// Create a model over a calibration.
    pub fn new(calibration: Calibration) -> Self {
        let shifted = shift_coefficients(calibration.area_coefficients, calibration.domain_low);
        Self {
            calibration,
            shifted,
        }
    }

    /// The calibration this model evaluates.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Unclamped area polynomial (Horner form in the reference offset).
    pub fn area_polynomial(&self, elevation: f64) -> f64 {
        let u = elevation - self.calibration.domain_low;
        self.shifted.iter().rev().fold(0.0, |acc, &b| acc * u + b)
    }

    /// Surface area in m² at an absolute elevation, never negative.
    pub fn area_at(&self, elevation: f64) -> f64 {
        self.area_polynomial(elevation).max(0.0)
    }

    /// Antiderivative of the area polynomial anchored at the reference:
    /// `G(x) = Σ bᵢ uⁱ⁺¹ / (i+1)` with `u = x - domain_low`, so `G(domain_low) = 0`.
    pub fn antiderivative(&self, elevation: f64) -> f64 {
        let u = elevation - self.calibration.domain_low;
        let inner = self
            .shifted
            .iter()
            .enumerate()
            .rev()
            .fold(0.0, |acc, (i, &b)| acc * u + b / (i as f64 + 1.0));
        inner * u
    }

    /// Water volume in m³ between two elevations, never negative.
    pub fn volume_between(&self, low: f64, high: f64) -> f64 {
        (self.antiderivative(high) - self.antiderivative(low)).max(0.0)
    }

    /// Volume in m³ above the reference elevation.
    ///
    /// Zero at or below the reference.
    pub fn volume_at(&self, elevation: f64) -> f64 {
        let reference = self.calibration.reference_elevation();
        if elevation <= reference {
            return 0.0;
        }
        self.volume_between(reference, elevation)
    }

    /// Evaluate everything at one water level.
    pub fn sample(&self, elevation: f64, mass_tons: f64) -> HydraulicSample {
        let area_m2 = self.area_at(elevation);
        let volume_m3 = self.volume_at(elevation);
        let concentration_mg_l = concentration(volume_m3, mass_tons);
        let estimated_year = YearElevationSolver::new(self.calibration).estimated_year(area_m2);

        trace!(elevation, area_m2, volume_m3, concentration_mg_l, ?estimated_year, "hydraulic sample");

        HydraulicSample {
            elevation,
            area_m2,
            volume_m3,
            concentration_mg_l,
            estimated_year,
        }
    }

    /// Evenly spaced samples from `low` to `high` inclusive.
    ///
    /// `steps` is the number of intervals; `steps == 0` yields the single
    /// sample at `low`.
    pub fn sample_range(&self, low: f64, high: f64, steps: usize, mass_tons: f64) -> Vec<HydraulicSample> {
        if steps == 0 {
            return vec![self.sample(low, mass_tons)];
        }
        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                self.sample(low + t * (high - low), mass_tons)
            })
            .collect()
    }
}

impl Default for HydraulicModel {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}
