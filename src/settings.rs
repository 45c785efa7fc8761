//! Game settings and preferences
//!
//! Persisted as JSON next to the executable, separate from level data.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;
use crate::tuning::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Content ===
    /// Directory holding `level{id}_data` files
    pub levels_dir: PathBuf,
    /// Optional tuning override file
    pub tuning_file: Option<PathBuf>,
    /// Level the game starts on
    pub start_level: u32,
    /// Seed for enemy behavior
    pub seed: u64,

    // === Timing ===
    /// Frames (and simulation ticks) per second
    pub frame_rate: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Content
            levels_dir: PathBuf::from("."),
            tuning_file: None,
            start_level: 1,
            seed: 0,

            // Timing
            frame_rate: TICKS_PER_SECOND,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "platformer_settings.json";

    /// Load settings from `path`; a missing file yields defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;
        std::fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join(Settings::FILE_NAME)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        let settings = Settings {
            frame_rate: 30,
            muted: true,
            start_level: 4,
            levels_dir: PathBuf::from("levels"),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_save_into_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join(Settings::FILE_NAME);
        let err = Settings::default().save(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        std::fs::write(&path, r#"{ "music_volume": 0.25, "muted": true }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.music_volume, 0.25);
        assert!(settings.muted);
        assert_eq!(settings.frame_rate, Settings::default().frame_rate);
    }
}
