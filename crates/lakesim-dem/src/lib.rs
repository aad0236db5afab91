//! # lakesim-dem
//!
//! Elevation rasters for a lake basin: ingestion, synthetic fallback terrain
//! and height-based coloring.
//!
//! ## Overview
//!
//! A raw raster (any integer or float sample type) is downsampled with
//! nearest-neighbor sampling so its larger side fits a target size, then
//! normalized so the lowest valid cell sits at height 0. Samples that are NaN
//! or outside [-12000, 12000] are treated as no-data and written as 0. The
//! absolute floor is kept on the grid so callers can reconstruct real
//! elevations.
//!
//! When no raster is available, [`synthesize`] produces a deterministic bowl
//! shaped terrain instead.
//!
//! ## Examples
//!
//! ```
//! use lakesim_dem::{color_for, ingest, synthesize, TerrainConfig};
//!
//! let raw: Vec<i16> = vec![4310, 4305, -32768, 4320];
//! let result = ingest(&raw, 2, 2, 256)?;
//! assert_eq!(result.min_height, 4305.0);
//! assert_eq!(result.grid.heights(), &[5.0, 0.0, 0.0, 15.0]);
//!
//! let terrain = synthesize(&TerrainConfig::default())?;
//! let rgb = color_for(terrain.heights()[0] as f64, terrain.max_height());
//! assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)));
//! # Ok::<(), lakesim_dem::DemError>(())
//! ```
//!
//! ### Reading a GeoTIFF
//!
//! ```no_run
//! use lakesim_dem::RasterSource;
//!
//! let raster = RasterSource::from_file("dem_data/basin.tif")?;
//! let result = raster.ingest(256)?;
//! println!("{}x{} cells of {:.1} m", result.grid.width(), result.grid.height(), result.grid.cell_size());
//! # Ok::<(), lakesim_dem::DemError>(())
//! ```

mod color;
mod error;
mod grid;
mod ingest;
mod raster;
mod synth;

pub use color::{color_for, colorize, Rgb, GRASS, ROCK, SAND, SNOW};
pub use error::DemError;
pub use grid::{ElevationGrid, RawSample, MAX_VALID_ELEVATION, MIN_VALID_ELEVATION};
pub use ingest::{
    downsample_scale, ingest, ingest_with_pixel_size, pixel_size_meters, IngestResult,
    DEFAULT_PIXEL_SIZE_M, METERS_PER_DEGREE, NO_DATA_FALLBACK_RANGE,
};
pub use raster::RasterSource;
pub use synth::{synthesize, terrain_height, TerrainConfig};

/// Result type for DEM operations.
pub type Result<T> = std::result::Result<T, DemError>;
