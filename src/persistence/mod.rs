//! Level save/load
//!
//! Features:
//! - Versioned JSON envelope holding a row-major list of tile codes
//! - Temp-file-then-rename writes so a crash never leaves half a level
//! - Missing levels fall back to the default bounded grid
//! - Malformed levels are a hard error; nothing is partially loaded

pub mod envelope;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use envelope::{FORMAT_VERSION, LevelFile, decode, encode};
pub use store::{DirLevelStore, LevelStore, MemoryLevelStore, level_file_name};

/// Identifier of a level; the first level is 1
pub type LevelId = u32;

/// Errors raised while loading or saving a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {id}: I/O error on {path}: {source}")]
    Io {
        id: LevelId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("level {id}: malformed level file: {source}")]
    Decode {
        id: LevelId,
        #[source]
        source: serde_json::Error,
    },
    #[error("level {id}: failed to encode level: {source}")]
    Encode {
        id: LevelId,
        #[source]
        source: serde_json::Error,
    },
    #[error("level {id}: unsupported format version {version} (expected {FORMAT_VERSION})")]
    UnsupportedVersion { id: LevelId, version: u32 },
    #[error("level {id}: expected a {expected}x{expected} grid, found size {size} with {cells} cells")]
    DimensionMismatch {
        id: LevelId,
        expected: usize,
        size: usize,
        cells: usize,
    },
    #[error("level {id}: unknown tile code {code} at cell {index}")]
    UnknownTile { id: LevelId, index: usize, code: u8 },
}
