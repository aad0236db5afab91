//! Error types for the DEM crate.

use thiserror::Error;

/// Errors that can occur when working with elevation rasters.
///
/// Bad sample values are never errors: they are treated as no-data during
/// ingestion. These variants cover malformed buffers and file decoding.
#[derive(Debug, Error)]
pub enum DemError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error.
    #[error("TIFF decode error: {0}")]
    TiffDecode(#[from] tiff::TiffError),

    /// The raw buffer does not hold `width * height` samples.
    #[error("Raster of {width}x{height} needs {expected} samples, got {actual}")]
    DimensionMismatch {
        /// Declared raster width.
        width: usize,
        /// Declared raster height.
        height: usize,
        /// Number of samples implied by the dimensions.
        expected: usize,
        /// Number of samples supplied.
        actual: usize,
    },

    /// Target size for downsampling must be at least one cell.
    #[error("Invalid target size {0} (must be at least 1)")]
    InvalidTargetSize(usize),

    /// Invalid terrain synthesis configuration.
    #[error("Invalid terrain config: {0}")]
    InvalidTerrainConfig(String),

    /// The TIFF holds more than one sample per pixel.
    #[error("Unsupported raster layout: {0}")]
    UnsupportedLayout(String),
}
