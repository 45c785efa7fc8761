//! Tile Platformer - A tile-based 2D platformer with a companion level editor
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, collision resolution, actor, game state)
//! - `persistence`: Level file format and level stores
//! - `editor`: Level editing state machine shared by the editor binary
//! - `platform`: Frame pacing and line input for the native loop
//! - `input`: Per-tick input sources (autopilot, key scripts, live commands)
//! - `audio`: One-shot sound cues derived from simulation events
//! - `tuning`: Data-driven physics and gameplay constants
//! - `settings`: Runtime preferences
//! - `ui`: HUD text and sprite lists for a renderer

pub mod audio;
pub mod editor;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use editor::{Editor, EditorAction};
pub use input::{InputError, InputSource};
pub use persistence::{DirLevelStore, LevelError, LevelStore, MemoryLevelStore};
pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

/// Any failure the binaries report
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Game configuration constants
pub mod consts {
    /// Edge length of one tile in pixels
    pub const TILE_SIZE: i32 = 32;
    /// Tiles per row and per column of every level
    pub const GRID_SIZE: usize = 30;

    /// Screen dimensions (the grid fills the screen exactly)
    pub const SCREEN_WIDTH: i32 = TILE_SIZE * GRID_SIZE as i32;
    pub const SCREEN_HEIGHT: i32 = TILE_SIZE * GRID_SIZE as i32;
    /// Extra space below the grid used by the editor toolbar
    pub const EDITOR_MARGIN: i32 = 100;

    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Number of background variants cycled by level id
    pub const BACKGROUND_COUNT: u32 = 7;
}
