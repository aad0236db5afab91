//! Per-query hydraulic result.

use serde::{Deserialize, Serialize};

/// Lake state at one water elevation.
///
/// A pure function of elevation and solute mass; produced fresh on every
/// query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydraulicSample {
    /// Absolute water elevation (m).
    pub elevation: f64,
    /// Surface area (m²).
    pub area_m2: f64,
    /// Volume above the reference elevation (m³).
    pub volume_m3: f64,
    /// Solute concentration (mg/L).
    pub concentration_mg_l: f64,
    /// Calendar year matching the area, `None` for a dry lake.
    pub estimated_year: Option<i32>,
}

impl HydraulicSample {
    /// Surface area in km².
    pub fn area_km2(&self) -> f64 {
        self.area_m2 / crate::calibration::M2_PER_KM2
    }

    /// Volume in km³.
    pub fn volume_km3(&self) -> f64 {
        self.volume_m3 / 1e9
    }
}
