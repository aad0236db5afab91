//! Basin queries: the glue between terrain, hydraulic model and CLI output.

use crate::config::BasinConfig;
use crate::RunnerError;
use lakesim_dem::{colorize, synthesize, ElevationGrid, RasterSource};
use lakesim_hydro::{validate_mass, HydraulicModel, HydraulicSample, YearElevationSolver};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of a year query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearQuery {
    /// Requested year.
    pub year: f64,
    /// Target area implied by the year line (m²).
    pub target_area_m2: f64,
    /// Lake state at the solved elevation.
    pub sample: HydraulicSample,
}

/// Summary of a terrain grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    /// Raster path, or "synthetic".
    pub source: String,
    /// Cells along x.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Meters per cell.
    pub cell_size: f64,
    /// Ground extent (x, y) in meters.
    pub extent_m: (f64, f64),
    /// Absolute elevation of height 0.
    pub min_elevation: f64,
    /// Relative height range.
    pub max_height: f64,
    /// Average vertex color.
    pub mean_color: [f32; 3],
}

impl GridSummary {
    fn new(source: String, grid: &ElevationGrid) -> Self {
        let colors = colorize(grid);
        let mut mean_color = [0.0f32; 3];
        if !colors.is_empty() {
            let n = colors.len() as f32;
            for c in &colors {
                for ch in 0..3 {
                    mean_color[ch] += c[ch] / n;
                }
            }
        }
        Self {
            source,
            width: grid.width(),
            height: grid.height(),
            cell_size: grid.cell_size(),
            extent_m: grid.extent_meters(),
            min_elevation: grid.min_elevation(),
            max_height: grid.max_height(),
            mean_color,
        }
    }
}

/// A configured basin.
#[derive(Debug, Clone)]
pub struct Basin {
    config: BasinConfig,
    model: HydraulicModel,
    solver: YearElevationSolver,
}

impl Basin {
    /// Build the model and solver for a validated config.
    pub fn new(config: BasinConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        let model = HydraulicModel::new(config.calibration);
        let solver = YearElevationSolver::new(config.calibration);
        Ok(Self {
            config,
            model,
            solver,
        })
    }

    /// The basin configuration.
    pub fn config(&self) -> &BasinConfig {
        &self.config
    }

    /// Lake state at an absolute elevation.
    pub fn sample_at_elevation(
        &self,
        elevation: f64,
        mass_tons: f64,
    ) -> Result<HydraulicSample, RunnerError> {
        let mass_tons = validate_mass(mass_tons)?;
        if !elevation.is_finite() {
            return Err(RunnerError::ConfigError(format!(
                "elevation must be finite, got {}",
                elevation
            )));
        }
        if !self.config.calibration.in_domain(elevation) {
            warn!(
                elevation,
                low = self.config.calibration.domain_low,
                high = self.config.calibration.domain_high,
                "elevation outside calibrated domain"
            );
        }
        let sample = self.model.sample(elevation, mass_tons);
        debug!(
            elevation,
            area_km2 = sample.area_km2(),
            volume_km3 = sample.volume_km3(),
            concentration_mg_l = sample.concentration_mg_l,
            "sampled basin"
        );
        Ok(sample)
    }

    /// Lake state for a calendar year.
    pub fn sample_for_year(&self, year: f64, mass_tons: f64) -> Result<YearQuery, RunnerError> {
        if !year.is_finite() {
            return Err(RunnerError::ConfigError(format!(
                "year must be finite, got {}",
                year
            )));
        }
        let target_area_m2 = self.solver.area_from_year(year);
        let elevation = self.solver.elevation_from_area(target_area_m2);
        let sample = self.sample_at_elevation(elevation, mass_tons)?;
        Ok(YearQuery {
            year,
            target_area_m2,
            sample,
        })
    }

    /// Samples across the calibration domain in `steps` intervals.
    pub fn sweep(&self, steps: usize, mass_tons: f64) -> Result<Vec<HydraulicSample>, RunnerError> {
        let mass_tons = validate_mass(mass_tons)?;
        let c = &self.config.calibration;
        Ok(self.model.sample_range(c.domain_low, c.domain_high, steps, mass_tons))
    }

    /// Terrain grid from a raster, or the synthetic fallback.
    pub fn terrain(
        &self,
        dem: Option<&Path>,
        max_size: Option<usize>,
    ) -> Result<(String, ElevationGrid), RunnerError> {
        let target = max_size.unwrap_or(self.config.target_max_size);
        match dem {
            Some(path) => {
                let raster = RasterSource::from_file(path)?;
                let result = raster.ingest(target)?;
                info!(
                    path = %path.display(),
                    width = result.grid.width(),
                    height = result.grid.height(),
                    "ingested raster"
                );
                Ok((path.display().to_string(), result.grid))
            }
            None => {
                info!("no raster given, using synthetic terrain");
                Ok(("synthetic".to_string(), synthesize(&self.config.synthetic)?))
            }
        }
    }

    /// Summary of the terrain grid.
    pub fn grid_summary(
        &self,
        dem: Option<&Path>,
        max_size: Option<usize>,
    ) -> Result<GridSummary, RunnerError> {
        let (source, grid) = self.terrain(dem, max_size)?;
        Ok(GridSummary::new(source, &grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn basin() -> Basin {
        Basin::new(BasinConfig::default()).expect("basin")
    }

    #[test]
    fn test_sample_at_elevation() {
        let sample = basin().sample_at_elevation(4320.0, 500.0).expect("sample");
        assert!(sample.area_m2 > 0.0);
        assert!(sample.concentration_mg_l > 0.0);
    }

    #[test]
    fn test_rejects_negative_mass() {
        let err = basin().sample_at_elevation(4320.0, -1.0).unwrap_err();
        assert!(matches!(err, RunnerError::HydroError(_)));
    }

    #[test]
    fn test_year_query() {
        let query = basin().sample_for_year(2023.0, 0.0).expect("query");
        assert_eq!(query.sample.estimated_year, Some(2023));
        assert_relative_eq!(query.sample.area_m2, query.target_area_m2, epsilon = 16.0);
    }

    #[test]
    fn test_dry_year_query() {
        let query = basin().sample_for_year(1900.0, 100.0).expect("query");
        assert_eq!(query.target_area_m2, 0.0);
        assert_eq!(query.sample.elevation, 4304.0);
        assert_eq!(query.sample.volume_m3, 0.0);
        assert_eq!(query.sample.concentration_mg_l, 0.0);
    }

    #[test]
    fn test_sweep_covers_domain() {
        let samples = basin().sweep(36, 0.0).expect("sweep");
        assert_eq!(samples.len(), 37);
        assert_eq!(samples[0].elevation, 4304.0);
        assert_eq!(samples[36].elevation, 4340.0);
    }

    #[test]
    fn test_synthetic_grid_summary() {
        let mut config = BasinConfig::default();
        config.synthetic.width = 16;
        config.synthetic.depth = 12;
        let summary = Basin::new(config)
            .expect("basin")
            .grid_summary(None, None)
            .expect("summary");
        assert_eq!(summary.source, "synthetic");
        assert_eq!((summary.width, summary.height), (16, 12));
        assert_eq!(summary.min_elevation, 4304.0);
        assert_eq!(summary.extent_m, (16.0 * 30.0, 12.0 * 30.0));
        assert!(summary.mean_color.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}
