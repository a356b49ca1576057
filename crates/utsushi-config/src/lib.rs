use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use utsushi_types::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, WindowGeometry};

use self::api::ApiConfig;
use self::display::DisplayConfig;
use self::hotkeys::HotkeyConfig;

pub mod api;
pub mod display;
pub mod hotkeys;

const DEFAULT_CONFIG_FILE: &str = "utsushi_config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to back up {path}: {source}")]
    Backup { path: PathBuf, source: io::Error },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Last result window placement as `WxH+X+Y`, written back on close
    pub result_window_geometry: Option<String>,
    pub api: ApiConfig,
    pub hotkeys: HotkeyConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Remembered geometry, ignoring a value that does not parse or is
    /// smaller than the minimum window size
    pub fn window_geometry(&self) -> Option<WindowGeometry> {
        let raw = self.result_window_geometry.as_deref()?;
        let geometry: WindowGeometry = match raw.parse() {
            Ok(geometry) => geometry,
            Err(e) => {
                tracing::warn!("Ignoring remembered geometry: {}", e);
                return None;
            }
        };

        if geometry.width < MIN_WINDOW_WIDTH || geometry.height < MIN_WINDOW_HEIGHT {
            tracing::warn!(
                "Ignoring remembered geometry {}: smaller than {}x{}",
                geometry,
                MIN_WINDOW_WIDTH,
                MIN_WINDOW_HEIGHT
            );
            return None;
        }
        Some(geometry)
    }

    pub fn set_window_geometry(&mut self, geometry: WindowGeometry) {
        self.result_window_geometry = Some(geometry.to_string());
    }
}

/// Config file on disk plus the session-only overrides taken from the environment
#[derive(Debug)]
pub struct ConfigDocument {
    path: PathBuf,
    config: Config,
    api_key_override: Option<String>,
    /// The file on disk could not be loaded; move it aside before the first save
    backup_pending: bool,
}

impl ConfigDocument {
    /// `UTSUSHI_CONFIG`, or `utsushi_config.json` in the working directory
    pub fn default_path() -> PathBuf {
        env::var("UTSUSHI_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load the document; a missing or malformed file yields defaults
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let (config, backup_pending) = match read_config(&path) {
            Ok(Some(config)) => {
                tracing::info!("Loaded config from {}", path.display());
                (config, false)
            }
            Ok(None) => {
                tracing::info!("No config at {}, using defaults", path.display());
                (Config::default(), false)
            }
            Err(e) => {
                tracing::error!("Config load failed, using defaults: {}", e);
                (Config::default(), true)
            }
        };

        let api_key_override = env::var("UTSUSHI_API_KEY").ok().filter(|k| !k.is_empty());

        Self {
            path,
            config,
            api_key_override,
            backup_pending,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// API settings with the environment key applied
    pub fn api(&self) -> ApiConfig {
        let mut api = self.config.api.clone();
        if let Some(key) = &self.api_key_override {
            api.api_key = key.clone();
        }
        api
    }

    /// Store the result window geometry and write the document back
    pub fn remember_geometry(&mut self, geometry: WindowGeometry) -> Result<(), ConfigError> {
        self.config.set_window_geometry(geometry);
        self.save()
    }

    /// Write the document. A file that failed to load is first renamed to
    /// `<path>.bak` so its contents are never overwritten.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(&self.config)?;

        if self.backup_pending {
            let backup = backup_path(&self.path);
            match fs::rename(&self.path, &backup) {
                Ok(()) => tracing::warn!(
                    "Moved unreadable config {} to {}",
                    self.path.display(),
                    backup.display()
                ),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(ConfigError::Backup { path: backup, source }),
            }
            self.backup_pending = false;
        }

        fs::write(&self.path, json).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("Config saved to {}", self.path.display());
        Ok(())
    }
}

/// `<path>.bak`, next to the config file
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn read_config(path: &Path) -> Result<Option<Config>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
