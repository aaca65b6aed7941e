//! Persisted application configuration.
//!
//! Settings live in a TOML file under the `.gridpad` root. Every field has a
//! serde default so configs written by older builds keep loading, and
//! out-of-range values are clamped rather than rejected.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};
use crate::export::Polarity;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Smallest accepted grid side.
pub const MIN_GRID_SIZE: usize = 1;
/// Largest accepted grid side.
pub const MAX_GRID_SIZE: usize = 32;
/// Smallest accepted on-screen cell size in pixels.
pub const MIN_CELL_PX: u32 = 8;
/// Largest accepted on-screen cell size in pixels.
pub const MAX_CELL_PX: u32 = 128;

/// Errors raised while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be resolved or created.
    #[error(transparent)]
    Dir(#[from] AppDirError),
    /// The config file exists but could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file contents are not valid TOML for this schema.
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The config file could not be written.
    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Export behavior switches the two historical variants disagree on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPolicy {
    /// Clear the sample store after a successful table export.
    #[serde(default = "default_true")]
    pub clear_after_save: bool,
    /// Color a set cell takes in an exported image.
    #[serde(default)]
    pub ink: Polarity,
    /// Accept exporting an image of an empty grid (writes a blank raster).
    #[serde(default = "default_true")]
    pub allow_empty_image: bool,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            clear_after_save: true,
            ink: Polarity::Black,
            allow_empty_image: true,
        }
    }
}

/// Full persisted configuration.
///
/// Defaults match the plain 8×8 variant; [`AppConfig::labeled_5x5`] is the
/// labeled preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cells per grid side.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Whether drawings carry a class label as the trailing vector entry.
    #[serde(default)]
    pub labeled: bool,
    /// On-screen (and exported) cell size in pixels.
    #[serde(default = "default_cell_px")]
    pub cell_px: u32,
    /// Export behavior switches.
    #[serde(default)]
    pub export: ExportPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            labeled: false,
            cell_px: default_cell_px(),
            export: ExportPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Preset matching the labeled 5×5 variant.
    pub fn labeled_5x5() -> Self {
        Self {
            grid_size: 5,
            labeled: true,
            cell_px: default_cell_px(),
            export: ExportPolicy {
                clear_after_save: false,
                ink: Polarity::White,
                allow_empty_image: false,
            },
        }
    }

    /// Clamp out-of-range values, logging what was adjusted.
    pub fn normalize(&mut self) {
        let grid_size = self.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        if grid_size != self.grid_size {
            tracing::warn!(
                "Config grid_size {} out of range; clamped to {grid_size}",
                self.grid_size
            );
            self.grid_size = grid_size;
        }
        let cell_px = self.cell_px.clamp(MIN_CELL_PX, MAX_CELL_PX);
        if cell_px != self.cell_px {
            tracing::warn!(
                "Config cell_px {} out of range; clamped to {cell_px}",
                self.cell_px
            );
            self.cell_px = cell_px;
        }
    }
}

/// Load the config from the app directory, writing a default file on first
/// launch so the variant and policy switches are discoverable.
pub fn load_or_init() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        let config = AppConfig::default();
        save_to(&path, &config)?;
        tracing::info!("Wrote default config to {}", path.display());
        return Ok(config);
    }
    load_from(&path)
}

/// Load and normalize a config from an explicit path.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: AppConfig =
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.normalize();
    Ok(config)
}

/// Persist the config to the app directory.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to(&config_path()?, config)
}

/// Persist the config to an explicit path.
pub fn save_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

fn default_grid_size() -> usize {
    8
}

fn default_cell_px() -> u32 {
    50
}

fn default_true() -> bool {
    true
}
