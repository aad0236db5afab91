//! Raster ingestion: nearest-neighbor downsampling and height normalization.

use crate::grid::{ElevationGrid, RawSample};
use crate::{DemError, Result};
use tracing::{debug, warn};

/// Height range reported when a raster holds no valid samples at all.
pub const NO_DATA_FALLBACK_RANGE: (f64, f64) = (0.0, 10.0);

/// Source pixel size assumed when a raster carries no scale metadata.
///
/// Matches 1 arc-second DEM products (~30 m).
pub const DEFAULT_PIXEL_SIZE_M: f64 = 30.0;

/// At the equator, 1 degree ≈ 111,320 meters.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Output of [`ingest`].
#[derive(Debug, Clone, PartialEq)]
pub struct IngestResult {
    /// Normalized grid; its minimum is always 0.
    pub grid: ElevationGrid,
    /// Absolute elevation of the lowest valid sample.
    pub min_height: f64,
    /// Relative range between the highest and lowest valid samples.
    pub max_height: f64,
}

/// Downsampling factor for a raster whose larger side must fit `target_max_size`.
pub fn downsample_scale(orig_width: usize, orig_height: usize, target_max_size: usize) -> f64 {
    let largest = orig_width.max(orig_height);
    if largest > target_max_size {
        largest as f64 / target_max_size as f64
    } else {
        1.0
    }
}

/// Convert a source pixel scale to meters.
///
/// Geographic rasters store their pixel scale in degrees; anything below one
/// unit per pixel is assumed to be degrees and converted at the equatorial
/// rate. No reprojection is attempted.
pub fn pixel_size_meters(pixel_scale: f64) -> f64 {
    let scale = pixel_scale.abs();
    if scale > 0.0 && scale < 1.0 {
        scale * METERS_PER_DEGREE
    } else if scale >= 1.0 {
        scale
    } else {
        DEFAULT_PIXEL_SIZE_M
    }
}

/// Downsample and normalize a raw elevation raster.
///
/// Uses [`DEFAULT_PIXEL_SIZE_M`] as the source pixel size.
pub fn ingest<T: RawSample>(
    raw: &[T],
    orig_width: usize,
    orig_height: usize,
    target_max_size: usize,
) -> Result<IngestResult> {
    ingest_with_pixel_size(raw, orig_width, orig_height, target_max_size, DEFAULT_PIXEL_SIZE_M)
}

/// Downsample and normalize a raw elevation raster with a known pixel size.
///
/// Sampling is nearest-neighbor. NaN and out-of-range samples are no-data:
/// they do not contribute to the height statistics and are written as 0.
/// Valid samples are shifted down by the lowest valid sample, so the output
/// minimum is exactly 0.
pub fn ingest_with_pixel_size<T: RawSample>(
    raw: &[T],
    orig_width: usize,
    orig_height: usize,
    target_max_size: usize,
    pixel_size_m: f64,
) -> Result<IngestResult> {
    if target_max_size == 0 {
        return Err(DemError::InvalidTargetSize(target_max_size));
    }

    let expected = cell_count(orig_width, orig_height, raw.len())?;
    if raw.len() != expected {
        return Err(DemError::DimensionMismatch {
            width: orig_width,
            height: orig_height,
            expected,
            actual: raw.len(),
        });
    }

    let scale = downsample_scale(orig_width, orig_height, target_max_size);
    let out_width = (orig_width as f64 / scale).floor() as usize;
    let out_height = (orig_height as f64 / scale).floor() as usize;

    // Pass 1: resample and collect extrema over valid samples.
    let mut sampled: Vec<Option<f64>> = Vec::with_capacity(out_width * out_height);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for y in 0..out_height {
        let src_y = source_index(y, scale, orig_height);
        for x in 0..out_width {
            let src_x = source_index(x, scale, orig_width);
            let value = raw[src_y * orig_width + src_x];
            if value.is_valid_elevation() {
                let v = value.to_f64();
                min = min.min(v);
                max = max.max(v);
                sampled.push(Some(v));
            } else {
                sampled.push(None);
            }
        }
    }

    let valid = sampled.iter().filter(|s| s.is_some()).count();
    if valid == 0 {
        warn!(
            width = orig_width,
            height = orig_height,
            "raster has no valid elevation samples, using fallback range"
        );
        (min, max) = NO_DATA_FALLBACK_RANGE;
    }

    // Pass 2: rewrite relative to the floor found above.
    let data: Vec<f32> = sampled
        .into_iter()
        .map(|s| match s {
            Some(v) => (v - min) as f32,
            None => 0.0,
        })
        .collect();

    let range = max - min;
    debug!(
        orig_width,
        orig_height,
        out_width,
        out_height,
        scale,
        valid,
        min_elevation = min,
        range,
        "ingested elevation raster"
    );

    let grid = ElevationGrid::from_parts(
        data,
        out_width,
        out_height,
        pixel_size_m * scale,
        min,
        range,
    );

    Ok(IngestResult {
        grid,
        min_height: min,
        max_height: range,
    })
}

/// Number of cells in a `width` x `height` raster.
///
/// Dimensions whose product overflows cannot match any buffer and are
/// reported as a mismatch against `actual`.
pub(crate) fn cell_count(width: usize, height: usize, actual: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or(DemError::DimensionMismatch {
            width,
            height,
            expected: usize::MAX,
            actual,
        })
}

/// Nearest source index for an output cell, clamped into the source raster.
fn source_index(out: usize, scale: f64, orig_dim: usize) -> usize {
    let src = (out as f64 * scale).floor() as usize;
    src.min(orig_dim.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_downsample_scale() {
        assert_eq!(downsample_scale(100, 50, 200), 1.0);
        assert_eq!(downsample_scale(200, 200, 200), 1.0);
        assert_eq!(downsample_scale(400, 100, 200), 2.0);
        assert_relative_eq!(downsample_scale(300, 1000, 400), 2.5);
    }

    #[test]
    fn test_pixel_size_meters() {
        assert_relative_eq!(pixel_size_meters(30.0), 30.0);
        assert_relative_eq!(pixel_size_meters(-10.0), 10.0);
        // 1 arc-second
        assert_relative_eq!(pixel_size_meters(1.0 / 3600.0), 111_320.0 / 3600.0);
        assert_relative_eq!(pixel_size_meters(0.0), DEFAULT_PIXEL_SIZE_M);
    }

    #[test]
    fn test_no_downsampling_keeps_dimensions() {
        let raw: Vec<i16> = (0..12).map(|v| 4300 + v).collect();
        let result = ingest(&raw, 4, 3, 4).expect("ingest");

        assert_eq!(result.grid.dimensions(), (4, 3));
        assert_eq!(result.min_height, 4300.0);
        assert_eq!(result.max_height, 11.0);
        assert_eq!(result.grid.heights()[0], 0.0);
        assert_eq!(result.grid.heights()[11], 11.0);
        assert_eq!(result.grid.cell_size(), DEFAULT_PIXEL_SIZE_M);
    }

    #[test]
    fn test_nearest_neighbor_downsampling() {
        // 4x4 raster, value = x + 10*y
        let raw: Vec<f32> = (0..16).map(|i| ((i % 4) + 10 * (i / 4)) as f32).collect();
        let result = ingest(&raw, 4, 4, 2).expect("ingest");

        assert_eq!(result.grid.dimensions(), (2, 2));
        // Picks source cells (0,0), (2,0), (0,2), (2,2)
        assert_eq!(result.grid.heights(), &[0.0, 2.0, 20.0, 22.0]);
        assert_eq!(result.grid.cell_size(), DEFAULT_PIXEL_SIZE_M * 2.0);
    }

    #[test]
    fn test_fractional_scale_stays_in_bounds() {
        let raw: Vec<u16> = (0..7 * 5).map(|v| v as u16).collect();
        let result = ingest(&raw, 7, 5, 3).expect("ingest");

        // scale = 7/3, floor(7/scale) = 3, floor(5/scale) = 2
        assert_eq!(result.grid.dimensions(), (3, 2));
        assert!(result.grid.heights().iter().all(|h| *h >= 0.0));
    }

    #[test]
    fn test_no_data_is_filled_with_zero() {
        let raw = [f32::NAN, 4310.0, -32768.0, 4320.0, 4305.0, 99_999.0];
        let result = ingest(&raw, 3, 2, 10).expect("ingest");

        assert_eq!(result.min_height, 4305.0);
        assert_eq!(result.max_height, 15.0);
        assert_eq!(result.grid.heights(), &[0.0, 5.0, 0.0, 15.0, 0.0, 0.0]);
    }

    #[test]
    fn test_all_no_data_uses_fallback_range() {
        let raw = [f64::NAN, -20_000.0, 15_000.0, f64::NAN];
        let result = ingest(&raw, 2, 2, 8).expect("ingest");

        assert_eq!(result.min_height, 0.0);
        assert_eq!(result.max_height, 10.0);
        assert!(result.grid.heights().iter().all(|h| *h == 0.0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let raw = [1.0f32; 5];
        let err = ingest(&raw, 3, 2, 10).unwrap_err();
        assert!(matches!(
            err,
            DemError::DimensionMismatch {
                expected: 6,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_overflowing_dimensions() {
        let raw = [1.0f32; 4];
        let err = ingest(&raw, usize::MAX, 3, 10).unwrap_err();
        assert!(matches!(
            err,
            DemError::DimensionMismatch {
                expected: usize::MAX,
                actual: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_target_size() {
        let raw = [1.0f32; 4];
        assert!(matches!(
            ingest(&raw, 2, 2, 0),
            Err(DemError::InvalidTargetSize(0))
        ));
    }

    #[test]
    fn test_empty_raster() {
        let raw: [f32; 0] = [];
        let result = ingest(&raw, 0, 0, 16).expect("ingest");
        assert!(result.grid.is_empty());
        assert_eq!(result.max_height, 10.0);
    }
}
