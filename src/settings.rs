//! Puzzle settings and preferences
//!
//! Persisted as JSON next to the executable (or wherever `RUBIK_SETTINGS` points).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_ROTATION_SPEED, DEFAULT_SHUFFLES, SCRAMBLE_ROTATION_SPEED};

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "RUBIK_SETTINGS";
/// Settings file used when the environment variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "rubik.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Puzzle settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Facet rotation speed (degrees/second)
    pub rotation_speed: f32,
    /// Rotation speed while the scramble key is held
    pub scramble_speed: f32,
    /// Random moves applied when a new game starts
    pub shuffles: u32,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
    /// Frame rate cap (0 = unlimited)
    pub max_fps: f32,
    /// Verbose logging
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rotation_speed: DEFAULT_ROTATION_SPEED,
            scramble_speed: SCRAMBLE_ROTATION_SPEED,
            shuffles: DEFAULT_SHUFFLES,
            seed: None,
            max_fps: 0.0,
            debug: false,
        }
    }
}

impl Settings {
    /// Longest frame the simulation accepts in one update (seconds).
    ///
    /// With a frame cap this is two frames' worth, otherwise 100 ms.
    pub fn frame_budget(&self) -> f32 {
        if self.max_fps > 0.0 {
            2.0 / self.max_fps
        } else {
            0.1
        }
    }

    /// Log level implied by the `debug` flag
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// Path from the environment, falling back to the default file name
    pub fn path_from_env() -> std::path::PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(Into::into)
            .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.into())
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Read settings, falling back to defaults when missing or malformed
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty-printed JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
