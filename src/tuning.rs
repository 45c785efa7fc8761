//! Data-driven game balance
//!
//! Every physics and gameplay constant the simulation reads lives here so a
//! level designer can override them from a JSON file without recompiling.

use std::path::{Path, PathBuf};

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while reading a tuning or settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Physics and gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal displacement per tick while a direction is held
    pub move_speed: i32,
    /// Added to vertical velocity every tick
    pub gravity: i32,
    /// Terminal downward velocity
    pub max_fall_speed: i32,
    /// Upward velocity applied when a jump starts
    pub jump_speed: i32,

    /// Proximity window used to decide whether the actor hit a moving platform
    /// from above or from below
    pub platform_snap_threshold: i32,
    /// Per-tick step of moving platforms along their axis
    pub platform_step: i32,
    /// Travel counter bound before a platform reverses
    pub platform_reach: i32,
    /// Per-tick step of walking enemies
    pub enemy_step: i32,
    /// Travel counter bound before an enemy turns around
    pub enemy_reach: i32,
    /// Upper bound (inclusive) of the per-tick idle roll
    pub enemy_idle_roll_max: u32,
    /// Rolls at or above this value start an idle pause of `roll / 5` ticks
    pub enemy_idle_roll_trigger: u32,

    /// Sprite origin the actor spawns at, independent of level content
    pub spawn: IVec2,
    /// Inset of the collision box from the sprite origin
    pub actor_offset: IVec2,
    /// Collision box size of the actor
    pub actor_size: IVec2,

    /// First level of a run
    pub first_level: u32,
    /// Last level of a run; completing it ends the game
    pub max_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 5,
            gravity: 1,
            max_fall_speed: 10,
            jump_speed: 15,

            platform_snap_threshold: 20,
            platform_step: 1,
            platform_reach: 50,
            enemy_step: 1,
            enemy_reach: 50,
            enemy_idle_roll_max: 500,
            enemy_idle_roll_trigger: 498,

            spawn: IVec2::new(100, SCREEN_HEIGHT - 2 * TILE_SIZE),
            actor_offset: IVec2::new(6, 6),
            actor_size: IVec2::new(TILE_SIZE - 12, TILE_SIZE - 6),

            first_level: 1,
            max_level: 11,
        }
    }
}

impl Tuning {
    /// Load tuning overrides from a JSON file; missing fields keep defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No tuning file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Top-left corner of the actor's collision box at spawn
    pub fn spawn_box_origin(&self) -> IVec2 {
        self.spawn + self.actor_offset
    }

    /// True if `level` is past the last level of the run
    pub fn is_past_last_level(&self, level: u32) -> bool {
        level > self.max_level
    }
}
