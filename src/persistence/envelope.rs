//! On-disk level encoding
//!
//! ```json
//! { "version": 1, "size": 30, "tiles": [1, 1, 1, ..., 2, 2] }
//! ```
//!
//! `tiles` is row-major and holds exactly `size * size` codes.

use serde::{Deserialize, Serialize};

use super::{LevelError, LevelId};
use crate::consts::GRID_SIZE;
use crate::sim::{TileCode, TileGrid};

/// Current level format version
pub const FORMAT_VERSION: u32 = 1;

/// Serialized form of a level grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    pub version: u32,
    pub size: usize,
    pub tiles: Vec<u8>,
}

impl From<&TileGrid> for LevelFile {
    fn from(grid: &TileGrid) -> Self {
        Self {
            version: FORMAT_VERSION,
            size: grid.size(),
            tiles: grid.cells().iter().map(|c| c.code()).collect(),
        }
    }
}

impl LevelFile {
    /// Validate and convert into a grid
    pub fn into_grid(self, id: LevelId) -> Result<TileGrid, LevelError> {
        if self.version != FORMAT_VERSION {
            return Err(LevelError::UnsupportedVersion {
                id,
                version: self.version,
            });
        }

        let mismatch = || LevelError::DimensionMismatch {
            id,
            expected: GRID_SIZE,
            size: self.size,
            cells: self.tiles.len(),
        };
        if self.size != GRID_SIZE || self.tiles.len() != GRID_SIZE * GRID_SIZE {
            return Err(mismatch());
        }

        let cells = self
            .tiles
            .iter()
            .enumerate()
            .map(|(index, &code)| {
                TileCode::from_code(code).ok_or(LevelError::UnknownTile { id, index, code })
            })
            .collect::<Result<Vec<_>, _>>()?;

        TileGrid::from_cells(cells).ok_or_else(mismatch)
    }
}

/// Serialize a grid to bytes
pub fn encode(id: LevelId, grid: &TileGrid) -> Result<Vec<u8>, LevelError> {
    serde_json::to_vec(&LevelFile::from(grid)).map_err(|source| LevelError::Encode { id, source })
}

/// Parse and validate level bytes
pub fn decode(id: LevelId, bytes: &[u8]) -> Result<TileGrid, LevelError> {
    let file: LevelFile =
        serde_json::from_slice(bytes).map_err(|source| LevelError::Decode { id, source })?;
    file.into_grid(id)
}
