#![forbid(unsafe_code)]

//! Surface configuration.
//!
//! Groups the tunables the surface consults while a drag is running:
//! classifier band and split lines, the redundant-drop policy, and the track
//! sizes used when the host asks the surface for pixel rectangles.
//!
//! # Loading
//!
//! ```toml
//! suppress_redundant_drops = true
//!
//! [classifier]
//! band_low = 0.3
//! band_high = 0.7
//!
//! [geometry]
//! column_gap = 8.0
//! ```
//!
//! ```rust,ignore
//! let config = SurfaceConfig::from_toml_file("gridform.toml")?;
//! let config = SurfaceConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `SurfaceConfig::default()` reproduces the built-in behaviour: band
//! `[0.33, 0.66]`, both split lines at `0.5`, redundant drops skipped.

#[cfg(feature = "config")]
use std::path::Path;

use gridform_layout::{ClassifierTuning, ClassifierTuningError, GridGeometry};
use serde::{Deserialize, Serialize};

/// Configuration for a [`GridSurface`](crate::GridSurface).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Edge classification tuning.
    pub classifier: ClassifierTuning,
    /// Skip drops that would put the item back where it already is.
    pub suppress_redundant_drops: bool,
    /// Track sizes for [`GridSurface::solve`](crate::GridSurface::solve).
    pub geometry: GridGeometry,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierTuning::default(),
            suppress_redundant_drops: true,
            geometry: GridGeometry::default(),
        }
    }
}

impl SurfaceConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the classifier tuning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate().map_err(ConfigError::Invalid)
    }
}

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Parsed, but out of range.
    Invalid(ClassifierTuningError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}
