//! TOML configuration for the `nc_map` binary.
//!
//! Every section is optional. Missing keys take their defaults, so a file
//! only needs the values it changes:
//!
//! ```toml
//! [region]
//! duplicate_names = "first"
//!
//! [dataset.observations]
//! region_id = "council"
//!
//! [render.heatmap]
//! radius = 15.0
//! ```

use std::path::{Path, PathBuf};

use nc_map_boundary_models::BoundaryFieldMapping;
use nc_map_region::DuplicateNamePolicy;
use nc_map_render::RenderConfig;
use nc_map_request_models::ObservationColumns;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "NC_MAP_CONFIG";

/// Errors that can occur while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`NcMapConfig`].
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Full configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NcMapConfig {
    /// Region selection settings.
    pub region: RegionConfig,
    /// Input column and property names.
    pub dataset: DatasetConfig,
    /// Map styling.
    pub render: RenderConfig,
}

/// Region selection settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// What to do when several boundaries share the requested name.
    pub duplicate_names: DuplicateNamePolicy,
}

/// Input column and property names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Observation table columns.
    pub observations: ObservationColumns,
    /// Boundary and metric table properties.
    pub boundaries: BoundaryFieldMapping,
}

impl NcMapConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed or a value
    /// has the wrong type.
    pub fn parse(body: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(body)?)
    }

    /// Loads the config from `path`, or from [`CONFIG_ENV_VAR`] when `path`
    /// is `None`. With neither set, or when the file does not exist, the
    /// defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let Some(path) = path else {
            log::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            log::warn!(
                "Config file {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let body = std::fs::read_to_string(&path)?;
        let config = Self::parse(&body)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
