//! Basin configuration files.
//!
//! A basin file is YAML; every section is optional and falls back to the
//! built-in basin:
//!
//! ```yaml
//! name: Example basin
//! target_max_size: 256
//! calibration:
//!   area_coefficients: [-39193471560745472.0, 36253391866272.0, -12573795152.0, 1937992.0, -112.0]
//!   year_slope: 27.84
//!   year_intercept: -54281.6
//!   domain_low: 4304.0
//!   domain_high: 4340.0
//! synthetic:
//!   width: 128
//!   depth: 128
//!   cell_size: 30.0
//!   base_elevation: 4304.0
//! ```

use crate::RunnerError;
use lakesim_dem::TerrainConfig;
use lakesim_hydro::Calibration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Default largest grid side after downsampling.
pub const DEFAULT_TARGET_MAX_SIZE: usize = 256;

/// Everything needed to model one basin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasinConfig {
    /// Display name.
    pub name: Option<String>,
    /// Area, year and domain constants.
    pub calibration: Calibration,
    /// Largest grid side after raster downsampling.
    pub target_max_size: usize,
    /// Fallback terrain used when no raster is given.
    pub synthetic: TerrainConfig,
}

impl Default for BasinConfig {
    fn default() -> Self {
        Self {
            name: None,
            calibration: Calibration::default(),
            target_max_size: DEFAULT_TARGET_MAX_SIZE,
            synthetic: TerrainConfig::default(),
        }
    }
}

impl BasinConfig {
    /// Parse and validate a basin from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, RunnerError> {
        let config: BasinConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a basin file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RunnerError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        info!(
            path = %path.display(),
            name = config.name.as_deref().unwrap_or("unnamed"),
            "loaded basin config"
        );
        Ok(config)
    }

    /// Check all sections.
    pub fn validate(&self) -> Result<(), RunnerError> {
        self.calibration.validate()?;
        self.synthetic.validate()?;
        if self.target_max_size == 0 {
            return Err(RunnerError::ConfigError(
                "target_max_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
