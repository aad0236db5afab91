//! Synthetic fallback terrain.
//!
//! Used when no elevation raster is available. The terrain is a radial bowl
//! with three fixed sine/cosine bands on top. There is no random seed, so the
//! same config always produces bit-identical heights.

use crate::grid::ElevationGrid;
use crate::{DemError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Divisor applied to the squared distance from the grid center.
const BOWL_DIVISOR: f64 = 1000.0;

/// Noise bands as (amplitude, x frequency, x phase, z frequency, z phase).
const NOISE_BANDS: [(f64, f64, f64, f64, f64); 3] = [
    (2.0, 0.08, 0.0, 0.08, 0.0),
    (1.2, 0.21, 1.7, 0.17, 0.4),
    (0.4, 0.53, 3.1, 0.47, 2.2),
];

/// Configuration for a synthetic terrain grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of cells along x.
    pub width: usize,
    /// Number of cells along z.
    pub depth: usize,
    /// Ground distance of one cell in meters.
    pub cell_size: f64,
    /// Absolute elevation assigned to relative height 0.
    pub base_elevation: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 128,
            depth: 128,
            cell_size: 30.0,
            base_elevation: 4304.0,
        }
    }
}

impl TerrainConfig {
    /// Check that the config describes a usable grid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.depth == 0 {
            return Err(DemError::InvalidTerrainConfig(format!(
                "grid must have at least one cell, got {}x{}",
                self.width, self.depth
            )));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(DemError::InvalidTerrainConfig(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }
        if !self.base_elevation.is_finite() {
            return Err(DemError::InvalidTerrainConfig(
                "base elevation must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Relative height of the synthetic terrain at cell `(x, z)`.
pub fn terrain_height(config: &TerrainConfig, x: usize, z: usize) -> f64 {
    let cx = config.width as f64 / 2.0;
    let cz = config.depth as f64 / 2.0;
    let (xf, zf) = (x as f64, z as f64);

    let distance_sq = (xf - cx).powi(2) + (zf - cz).powi(2);
    let bowl = distance_sq / BOWL_DIVISOR;

    let noise: f64 = NOISE_BANDS
        .iter()
        .map(|&(amp, fx, px, fz, pz)| amp * (xf * fx + px).sin() * (zf * fz + pz).cos())
        .sum();

    (bowl + noise).max(0.0)
}

/// Generate a synthetic terrain grid.
pub fn synthesize(config: &TerrainConfig) -> Result<ElevationGrid> {
    config.validate()?;

    let mut data = Vec::with_capacity(config.width * config.depth);
    let mut max_height = 0.0f32;
    for z in 0..config.depth {
        for x in 0..config.width {
            let h = terrain_height(config, x, z) as f32;
            max_height = max_height.max(h);
            data.push(h);
        }
    }

    debug!(
        width = config.width,
        depth = config.depth,
        max_height,
        "synthesized fallback terrain"
    );

    Ok(ElevationGrid::from_parts(
        data,
        config.width,
        config.depth,
        config.cell_size,
        config.base_elevation,
        max_height as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesize_is_deterministic() {
        let config = TerrainConfig {
            width: 64,
            depth: 48,
            ..TerrainConfig::default()
        };
        let a = synthesize(&config).expect("synthesize");
        let b = synthesize(&config).expect("synthesize");

        let bits_a: Vec<u32> = a.heights().iter().map(|h| h.to_bits()).collect();
        let bits_b: Vec<u32> = b.heights().iter().map(|h| h.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_heights_are_non_negative() {
        let grid = synthesize(&TerrainConfig::default()).expect("synthesize");
        assert!(grid.heights().iter().all(|h| *h >= 0.0));
        assert_eq!(grid.len(), 128 * 128);
    }

    #[test]
    fn test_bowl_rises_toward_edges() {
        let config = TerrainConfig::default();
        let center = terrain_height(&config, 64, 64);
        let corner = terrain_height(&config, 0, 0);
        // Corner bowl term is 8192/1000 ≈ 8.2, noise is bounded by 3.6
        assert!(corner > center);
    }

    #[test]
    fn test_grid_metadata() {
        let config = TerrainConfig {
            width: 10,
            depth: 20,
            cell_size: 5.0,
            base_elevation: 4300.0,
        };
        let grid = synthesize(&config).expect("synthesize");
        assert_eq!(grid.dimensions(), (10, 20));
        assert_eq!(grid.cell_size(), 5.0);
        assert_eq!(grid.min_elevation(), 4300.0);

        let observed = grid.heights().iter().cloned().fold(0.0f32, f32::max);
        assert_eq!(grid.max_height(), observed as f64);
    }

    #[test]
    fn test_invalid_config() {
        let empty = TerrainConfig {
            width: 0,
            ..TerrainConfig::default()
        };
        assert!(synthesize(&empty).is_err());

        let bad_cell = TerrainConfig {
            cell_size: -1.0,
            ..TerrainConfig::default()
        };
        assert!(matches!(
            synthesize(&bad_cell),
            Err(DemError::InvalidTerrainConfig(_))
        ));
    }
}
