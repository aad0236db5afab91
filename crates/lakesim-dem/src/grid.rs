//! Normalized height grid and raw raster sample types.

use serde::{Deserialize, Serialize};

/// Lowest raw value accepted as a real elevation (meters).
pub const MIN_VALID_ELEVATION: f64 = -12_000.0;

/// Highest raw value accepted as a real elevation (meters).
pub const MAX_VALID_ELEVATION: f64 = 12_000.0;

/// A single sample from a source raster.
///
/// Rasters arrive as signed or unsigned integers or floats of various widths;
/// everything is widened to `f64` before validation.
pub trait RawSample: Copy {
    /// Widen the sample to `f64`.
    fn to_f64(self) -> f64;

    /// Whether this sample carries a usable elevation.
    ///
    /// NaN and values outside [-12000, 12000] are no-data.
    fn is_valid_elevation(self) -> bool {
        let value = self.to_f64();
        !value.is_nan() && (MIN_VALID_ELEVATION..=MAX_VALID_ELEVATION).contains(&value)
    }
}

macro_rules! impl_raw_sample {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RawSample for $ty {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_raw_sample!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// A normalized elevation grid.
///
/// Heights are stored row-major relative to `min_elevation`, so the lowest
/// valid cell is always 0 and `min_elevation + height` is the absolute
/// elevation of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationGrid {
    /// Relative heights in row-major order.
    data: Vec<f32>,
    /// Number of cells along x.
    width: usize,
    /// Number of cells along y (rows).
    height: usize,
    /// Ground distance covered by one cell, in meters.
    cell_size: f64,
    /// Absolute elevation of the grid floor.
    min_elevation: f64,
    /// Relative height range (max - min).
    max_height: f64,
}

impl ElevationGrid {
    /// Assemble a grid from already-normalized heights.
    ///
    /// Callers guarantee `data.len() == width * height`.
    pub(crate) fn from_parts(
        data: Vec<f32>,
        width: usize,
        height: usize,
        cell_size: f64,
        min_elevation: f64,
        max_height: f64,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
            cell_size,
            min_elevation,
            max_height,
        }
    }

    /// Relative heights in row-major order.
    pub fn heights(&self) -> &[f32] {
        &self.data
    }

    /// Grid dimensions as (width, height) in cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Ground distance of one cell in meters.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Absolute elevation of the grid floor.
    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    /// Relative height range of the grid.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Relative height at a cell, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Absolute elevation at a cell, or `None` outside the grid.
    pub fn absolute_elevation(&self, x: usize, y: usize) -> Option<f64> {
        self.get(x, y).map(|h| self.min_elevation + h as f64)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Ground extent as (x, y) in meters.
    pub fn extent_meters(&self) -> (f64, f64) {
        (
            self.width as f64 * self.cell_size,
            self.height as f64 * self.cell_size,
        )
    }
}
