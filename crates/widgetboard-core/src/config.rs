//! Editor configuration.

use crate::canvas::CanvasSurface;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "WIDGETBOARD_CONFIG";
/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "widgetboard.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for new canvases and document storage. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Surface used for new documents.
    pub canvas: CanvasSurface,
    /// Directory for saved documents; the platform data directory when unset.
    pub storage_dir: Option<PathBuf>,
    /// Widget type added when none is named.
    pub default_kind: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSurface::default(),
            storage_dir: None,
            default_kind: "basic".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load from `$WIDGETBOARD_CONFIG`, else `./widgetboard.json`, else use defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::from_path(local);
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
