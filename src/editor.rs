//! Level editor state
//!
//! The editor works on one grid at a time. Clicking a cell cycles its tile code
//! (primary button forward, secondary backward); up/down pick which level id
//! the save and load actions target. Changing the id does not reload the grid,
//! so a layout can be copied to another level by switching id and saving.

use glam::IVec2;

use crate::persistence::{LevelError, LevelId, LevelStore};
use crate::sim::{TileCode, TileGrid};

/// Mouse button that cycles a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Cycle forward
    Primary,
    /// Cycle backward
    Secondary,
}

/// One discrete editor input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Button pressed at a screen position
    Press { pos: IVec2, button: PointerButton },
    /// All buttons released
    Release,
    LevelUp,
    LevelDown,
    Save,
    Load,
}

/// What an action changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Nothing changed (held button, click outside the grid, id already at 1)
    Unchanged,
    Edited { row: usize, col: usize, code: TileCode },
    LevelSelected(LevelId),
    Saved(LevelId),
    Loaded(LevelId),
}

/// Editing session for one grid
#[derive(Debug, Clone)]
pub struct Editor {
    /// Level id targeted by save/load
    pub level_id: LevelId,
    pub grid: TileGrid,
    /// A button is held; further presses are ignored until release
    pressed: bool,
    /// Edits since the last save or load
    pub dirty: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Fresh default grid targeting level 1
    pub fn new() -> Self {
        Self {
            level_id: 1,
            grid: TileGrid::default(),
            pressed: false,
            dirty: false,
        }
    }

    pub fn apply(
        &mut self,
        action: EditorAction,
        store: &mut impl LevelStore,
    ) -> Result<EditorOutcome, LevelError> {
        let outcome = match action {
            EditorAction::Press { pos, button } => self.press(pos, button),
            EditorAction::Release => {
                self.pressed = false;
                EditorOutcome::Unchanged
            }
            EditorAction::LevelUp => {
                self.level_id += 1;
                EditorOutcome::LevelSelected(self.level_id)
            }
            EditorAction::LevelDown => {
                if self.level_id > 1 {
                    self.level_id -= 1;
                    EditorOutcome::LevelSelected(self.level_id)
                } else {
                    EditorOutcome::Unchanged
                }
            }
            EditorAction::Save => {
                store.save(self.level_id, &self.grid)?;
                self.dirty = false;
                EditorOutcome::Saved(self.level_id)
            }
            EditorAction::Load => {
                self.grid = store.load(self.level_id)?;
                self.dirty = false;
                EditorOutcome::Loaded(self.level_id)
            }
        };
        Ok(outcome)
    }

    /// Cycle the cell under `pos`, once per press
    fn press(&mut self, pos: IVec2, button: PointerButton) -> EditorOutcome {
        if self.pressed {
            return EditorOutcome::Unchanged;
        }
        self.pressed = true;

        let Some((row, col)) = TileGrid::cell_at(pos) else {
            return EditorOutcome::Unchanged;
        };
        let code = self.cycle(row, col, button);
        self.dirty = true;
        log::debug!("Cell ({}, {}) -> {:?}", row, col, code);
        EditorOutcome::Edited { row, col, code }
    }

    /// Boundary cells only toggle between the two solid codes
    fn cycle(&mut self, row: usize, col: usize, button: PointerButton) -> TileCode {
        if self.grid.is_boundary(row, col) {
            let code = match self.grid.get(row, col) {
                TileCode::SolidGround => TileCode::SolidTop,
                _ => TileCode::SolidGround,
            };
            self.grid.set(row, col, code);
            return code;
        }
        match button {
            PointerButton::Primary => self.grid.cycle_next(row, col),
            PointerButton::Secondary => self.grid.cycle_prev(row, col),
        }
    }
}
