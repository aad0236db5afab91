//! Single-band GeoTIFF rasters.

use crate::ingest::{cell_count, ingest_with_pixel_size, pixel_size_meters, IngestResult, DEFAULT_PIXEL_SIZE_M};
use crate::{DemError, Result};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::debug;

/// A raw elevation raster as read from disk, before normalization.
#[derive(Debug, Clone)]
pub struct RasterSource {
    /// Samples in row-major order (north to south, west to east).
    data: Vec<f32>,
    /// Width in pixels.
    width: usize,
    /// Height in pixels.
    height: usize,
    /// Per-axis pixel scale from the GeoTIFF tags, in source units.
    pixel_scale: Option<(f64, f64)>,
    /// Declared no-data value, if the file has one.
    no_data_value: Option<f32>,
}

impl RasterSource {
    /// Wrap an in-memory raster.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        let expected = cell_count(width, height, data.len())?;
        if data.len() != expected {
            return Err(DemError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            pixel_scale: None,
            no_data_value: None,
        })
    }

    /// Attach per-axis pixel scale metadata.
    pub fn with_pixel_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.pixel_scale = Some((scale_x, scale_y));
        self
    }

    /// Load a raster from a single-band (Geo)TIFF file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let mut decoder = Decoder::new(file)?;

        // Large DEM tiles exceed the default decoder limits
        let mut limits = Limits::default();
        limits.decoding_buffer_size = 1024 * 1024 * 1024; // 1 GB
        limits.intermediate_buffer_size = 1024 * 1024 * 1024; // 1 GB
        limits.ifd_value_size = 1024 * 1024 * 1024;
        decoder = decoder.with_limits(limits);

        match decoder.colortype()? {
            ColorType::Gray(_) => {}
            other => {
                return Err(DemError::UnsupportedLayout(format!(
                    "expected a single-band raster, found {:?}",
                    other
                )))
            }
        }

        let (width, height) = decoder.dimensions()?;
        let pixel_scale = Self::read_pixel_scale(&mut decoder);
        let no_data_value = Self::read_nodata_value(&mut decoder);
        let mut data = Self::decode_elevation_data(&mut decoder)?;

        // Declared no-data becomes NaN so ingestion rejects it regardless of range
        if let Some(nodata) = no_data_value {
            for v in data.iter_mut() {
                if (*v - nodata).abs() < 0.001 {
                    *v = f32::NAN;
                }
            }
        }

        debug!(
            path = %path.display(),
            width,
            height,
            ?pixel_scale,
            ?no_data_value,
            "loaded elevation raster"
        );

        Ok(Self {
            data,
            width: width as usize,
            height: height as usize,
            pixel_scale,
            no_data_value,
        })
    }

    /// Read ModelPixelScale (tag 33550) as (x, y) units per pixel.
    fn read_pixel_scale<R: std::io::Read + std::io::Seek>(
        decoder: &mut Decoder<R>,
    ) -> Option<(f64, f64)> {
        let scale = decoder
            .get_tag_f64_vec(Tag::ModelPixelScaleTag)
            .ok()?;
        if scale.len() >= 2 {
            Some((scale[0], scale[1]))
        } else {
            None
        }
    }

    /// Try to read the no-data value from the GDAL_NODATA tag (42113).
    fn read_nodata_value<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<f32> {
        decoder
            .get_tag_ascii_string(Tag::GdalNodata)
            .ok()
            .and_then(|s| s.trim().trim_end_matches('\0').parse().ok())
    }

    /// Decode any supported sample type to `f32`.
    fn decode_elevation_data<R: std::io::Read + std::io::Seek>(
        decoder: &mut Decoder<R>,
    ) -> Result<Vec<f32>> {
        let result = decoder.read_image()?;

        match result {
            DecodingResult::F32(data) => Ok(data),
            DecodingResult::F64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I16(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U16(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U8(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I8(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        }
    }

    /// Raw samples in row-major order.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Dimensions in pixels.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Per-axis pixel scale, if known.
    pub fn pixel_scale(&self) -> Option<(f64, f64)> {
        self.pixel_scale
    }

    /// Declared no-data value, if any.
    pub fn no_data_value(&self) -> Option<f32> {
        self.no_data_value
    }

    /// Source pixel size in meters, using the x-axis scale.
    pub fn pixel_size_meters(&self) -> f64 {
        self.pixel_scale
            .map(|(sx, _)| pixel_size_meters(sx))
            .unwrap_or(DEFAULT_PIXEL_SIZE_M)
    }

    /// Downsample and normalize this raster.
    pub fn ingest(&self, target_max_size: usize) -> Result<IngestResult> {
        ingest_with_pixel_size(
            &self.data,
            self.width,
            self.height,
            target_max_size,
            self.pixel_size_meters(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_rejects_bad_length() {
        assert!(RasterSource::new(vec![0.0; 5], 2, 2).is_err());
        assert!(RasterSource::new(vec![0.0; 4], 2, 2).is_ok());
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        let err = RasterSource::new(vec![0.0; 4], usize::MAX, 2).unwrap_err();
        assert!(matches!(err, DemError::DimensionMismatch { actual: 4, .. }));
    }

    #[test]
    fn test_pixel_size_from_scale() {
        let raster = RasterSource::new(vec![0.0; 4], 2, 2).expect("raster");
        assert_eq!(raster.pixel_size_meters(), DEFAULT_PIXEL_SIZE_M);

        let raster = raster.with_pixel_scale(1.0 / 3600.0, 1.0 / 3600.0);
        assert_relative_eq!(raster.pixel_size_meters(), 30.922, epsilon = 1e-3);

        let raster = RasterSource::new(vec![0.0; 4], 2, 2)
            .expect("raster")
            .with_pixel_scale(10.0, 10.0);
        assert_eq!(raster.pixel_size_meters(), 10.0);
    }

    #[test]
    fn test_ingest_uses_pixel_size() {
        let data: Vec<f32> = (0..64).map(|v| 4304.0 + v as f32).collect();
        let raster = RasterSource::new(data, 8, 8)
            .expect("raster")
            .with_pixel_scale(10.0, 10.0);

        let result = raster.ingest(4).expect("ingest");
        assert_eq!(result.grid.dimensions(), (4, 4));
        assert_eq!(result.grid.cell_size(), 20.0);
        assert_eq!(result.min_height, 4304.0);
    }
}
