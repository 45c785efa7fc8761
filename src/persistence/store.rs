//! Where level grids live

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::envelope::{decode, encode};
use super::{LevelError, LevelId};
use crate::sim::TileGrid;

/// File name of a level inside the levels directory
pub fn level_file_name(id: LevelId) -> String {
    format!("level{id}_data")
}

/// Source and sink of level grids
pub trait LevelStore {
    /// Load a level; a level that was never saved is the default bounded grid
    fn load(&self, id: LevelId) -> Result<TileGrid, LevelError>;

    /// Save a level, replacing any previous version
    fn save(&mut self, id: LevelId, grid: &TileGrid) -> Result<(), LevelError>;
}

/// Levels stored as `level{id}_data` files in one directory
#[derive(Debug, Clone)]
pub struct DirLevelStore {
    root: PathBuf,
}

impl DirLevelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: LevelId) -> PathBuf {
        self.root.join(level_file_name(id))
    }
}

impl LevelStore for DirLevelStore {
    fn load(&self, id: LevelId) -> Result<TileGrid, LevelError> {
        let path = self.path_for(id);
        match std::fs::read(&path) {
            Ok(bytes) => {
                let grid = decode(id, &bytes)?;
                log::info!("Loaded level {} from {}", id, path.display());
                Ok(grid)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No file for level {}, using default grid", id);
                Ok(TileGrid::default())
            }
            Err(source) => Err(LevelError::Io { id, path, source }),
        }
    }

    fn save(&mut self, id: LevelId, grid: &TileGrid) -> Result<(), LevelError> {
        let path = self.path_for(id);
        std::fs::create_dir_all(&self.root).map_err(io_error(id, &self.root))?;
        // Write beside the target, then swap it in
        let tmp = path.with_extension("tmp");
        let bytes = encode(id, grid)?;
        std::fs::write(&tmp, bytes).map_err(io_error(id, &tmp))?;
        std::fs::rename(&tmp, &path).map_err(io_error(id, &path))?;

        log::info!("Saved level {} to {}", id, path.display());
        Ok(())
    }
}

fn io_error(id: LevelId, path: &Path) -> impl FnOnce(std::io::Error) -> LevelError {
    let path = path.to_path_buf();
    move |source| LevelError::Io { id, path, source }
}

/// In-memory levels for tests and tools
#[derive(Debug, Clone, Default)]
pub struct MemoryLevelStore {
    levels: HashMap<LevelId, TileGrid>,
}

impl MemoryLevelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: LevelId) -> bool {
        self.levels.contains_key(&id)
    }
}

impl LevelStore for MemoryLevelStore {
    fn load(&self, id: LevelId) -> Result<TileGrid, LevelError> {
        Ok(self.levels.get(&id).cloned().unwrap_or_default())
    }

    fn save(&mut self, id: LevelId, grid: &TileGrid) -> Result<(), LevelError> {
        self.levels.insert(id, grid.clone());
        Ok(())
    }
}
