//! Tile codes and the level grid
//!
//! The grid is the only persisted piece of a level. Everything else (solid
//! boxes, platforms, enemies, pickups) is derived from it when a level loads.

use std::cell::OnceCell;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::bodies::Axis;
use super::geom::Rect;
use crate::consts::*;

/// What occupies one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileCode {
    #[default]
    Empty = 0,
    SolidGround = 1,
    SolidTop = 2,
    Enemy = 3,
    MovingPlatformH = 4,
    MovingPlatformV = 5,
    Hazard = 6,
    Collectible = 7,
    Goal = 8,
}

/// Gameplay behavior of a tile code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileRole {
    Empty,
    Solid,
    Enemy,
    Platform(Axis),
    Hazard,
    Collectible,
    Goal,
}

/// Role of each code, indexed by the code's numeric value
const ROLES: [TileRole; TileCode::COUNT] = [
    TileRole::Empty,
    TileRole::Solid,
    TileRole::Solid,
    TileRole::Enemy,
    TileRole::Platform(Axis::Horizontal),
    TileRole::Platform(Axis::Vertical),
    TileRole::Hazard,
    TileRole::Collectible,
    TileRole::Goal,
];

impl TileCode {
    pub const COUNT: usize = 9;

    /// Every code in cycling order
    pub const ALL: [TileCode; Self::COUNT] = [
        TileCode::Empty,
        TileCode::SolidGround,
        TileCode::SolidTop,
        TileCode::Enemy,
        TileCode::MovingPlatformH,
        TileCode::MovingPlatformV,
        TileCode::Hazard,
        TileCode::Collectible,
        TileCode::Goal,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    #[inline]
    pub fn role(self) -> TileRole {
        ROLES[self as usize]
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.role() == TileRole::Solid
    }

    /// Next code, wrapping from the last back to `Empty`
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::COUNT]
    }

    /// Previous code, wrapping from `Empty` to the last
    pub fn prev(self) -> Self {
        Self::ALL[(self as usize + Self::COUNT - 1) % Self::COUNT]
    }
}

/// Fixed-size square grid of tile codes
#[derive(Debug, Clone)]
pub struct TileGrid {
    /// Row-major cells, `GRID_SIZE * GRID_SIZE` long
    cells: Vec<TileCode>,
    /// Derived collision boxes, rebuilt lazily after any edit
    solid_boxes: OnceCell<Vec<Rect>>,
}

impl PartialEq for TileGrid {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for TileGrid {}

impl Default for TileGrid {
    /// Empty interior with a solid boundary
    fn default() -> Self {
        let mut grid = Self::empty();
        grid.set_boundary();
        grid
    }
}

impl TileGrid {
    /// Grid with every cell `Empty`, boundary included
    pub fn empty() -> Self {
        Self {
            cells: vec![TileCode::Empty; GRID_SIZE * GRID_SIZE],
            solid_boxes: OnceCell::new(),
        }
    }

    /// Build a grid from row-major cells; `None` if the length is not `GRID_SIZE²`
    pub fn from_cells(cells: Vec<TileCode>) -> Option<Self> {
        if cells.len() != GRID_SIZE * GRID_SIZE {
            return None;
        }
        Some(Self {
            cells,
            solid_boxes: OnceCell::new(),
        })
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[TileCode] {
        &self.cells
    }

    #[inline]
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    #[inline]
    fn index(row: usize, col: usize) -> usize {
        assert!(
            row < GRID_SIZE && col < GRID_SIZE,
            "tile ({row}, {col}) outside {GRID_SIZE}x{GRID_SIZE} grid"
        );
        row * GRID_SIZE + col
    }

    /// Tile at `(row, col)`. Panics when out of range; callers clamp first.
    pub fn get(&self, row: usize, col: usize) -> TileCode {
        self.cells[Self::index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, code: TileCode) {
        self.cells[Self::index(row, col)] = code;
        self.invalidate();
    }

    /// Stamp the edges: dirt on the top row and both sides, grass along the floor
    pub fn set_boundary(&mut self) {
        let last = GRID_SIZE - 1;
        for i in 0..GRID_SIZE {
            self.cells[Self::index(0, i)] = TileCode::SolidGround;
            self.cells[Self::index(i, 0)] = TileCode::SolidGround;
            self.cells[Self::index(i, last)] = TileCode::SolidGround;
        }
        // Floor last so the bottom corners are grass
        for col in 0..GRID_SIZE {
            self.cells[Self::index(last, col)] = TileCode::SolidTop;
        }
        self.invalidate();
    }

    /// True for cells on the outer ring
    pub fn is_boundary(&self, row: usize, col: usize) -> bool {
        let last = GRID_SIZE - 1;
        row == 0 || col == 0 || row == last || col == last
    }

    /// Advance a cell to the next code (wrapping)
    pub fn cycle_next(&mut self, row: usize, col: usize) -> TileCode {
        let code = self.get(row, col).next();
        self.set(row, col, code);
        code
    }

    /// Step a cell back to the previous code (wrapping)
    pub fn cycle_prev(&mut self, row: usize, col: usize) -> TileCode {
        let code = self.get(row, col).prev();
        self.set(row, col, code);
        code
    }

    /// Iterate `(row, col, code)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileCode)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &code)| (i / GRID_SIZE, i % GRID_SIZE, code))
    }

    /// Screen-space box covering a whole cell
    pub fn cell_rect(row: usize, col: usize) -> Rect {
        Rect::new(
            col as i32 * TILE_SIZE,
            row as i32 * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
        )
    }

    /// Cell under a screen point, `None` outside the grid
    pub fn cell_at(point: IVec2) -> Option<(usize, usize)> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let col = (point.x / TILE_SIZE) as usize;
        let row = (point.y / TILE_SIZE) as usize;
        (row < GRID_SIZE && col < GRID_SIZE).then_some((row, col))
    }

    /// One full-tile box per solid cell, cached until the next edit
    pub fn solid_boxes(&self) -> &[Rect] {
        self.solid_boxes.get_or_init(|| {
            self.iter()
                .filter(|(_, _, code)| code.is_solid())
                .map(|(row, col, _)| Self::cell_rect(row, col))
                .collect()
        })
    }

    fn invalidate(&mut self) {
        self.solid_boxes.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_has_solid_boundary() {
        let grid = TileGrid::default();
        let last = GRID_SIZE - 1;
        for i in 0..GRID_SIZE {
            assert!(grid.get(0, i).is_solid());
            assert!(grid.get(i, 0).is_solid());
            assert!(grid.get(i, last).is_solid());
            assert_eq!(grid.get(last, i), TileCode::SolidTop);
        }
        assert_eq!(grid.get(0, 0), TileCode::SolidGround);
        assert_eq!(grid.get(15, 15), TileCode::Empty);
        // 4 edges of 30 minus the 4 shared corners
        assert_eq!(grid.solid_boxes().len(), 4 * GRID_SIZE - 4);
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut grid = TileGrid::empty();
        assert_eq!(grid.cycle_prev(5, 5), TileCode::Goal);
        assert_eq!(grid.cycle_next(5, 5), TileCode::Empty);
        for expected in &TileCode::ALL[1..] {
            assert_eq!(grid.cycle_next(5, 5), *expected);
        }
        assert_eq!(grid.cycle_next(5, 5), TileCode::Empty);
    }

    #[test]
    fn test_edit_invalidates_solid_boxes() {
        let mut grid = TileGrid::default();
        let before = grid.solid_boxes().len();
        grid.set(10, 5, TileCode::SolidGround);
        assert_eq!(grid.solid_boxes().len(), before + 1);
        assert!(grid.solid_boxes().contains(&Rect::new(5 * TILE_SIZE, 10 * TILE_SIZE, 32, 32)));
        grid.cycle_next(10, 5);
        grid.cycle_next(10, 5);
        assert_eq!(grid.solid_boxes().len(), before);
    }

    #[test]
    fn test_role_lookup() {
        assert_eq!(TileCode::MovingPlatformH.role(), TileRole::Platform(Axis::Horizontal));
        assert_eq!(TileCode::MovingPlatformV.role(), TileRole::Platform(Axis::Vertical));
        assert_eq!(TileCode::from_code(8), Some(TileCode::Goal));
        assert_eq!(TileCode::from_code(9), None);
    }

    #[test]
    fn test_cell_at_clamps_to_grid() {
        assert_eq!(TileGrid::cell_at(IVec2::new(40, 70)), Some((2, 1)));
        assert_eq!(TileGrid::cell_at(IVec2::new(40, SCREEN_HEIGHT + 10)), None);
        assert_eq!(TileGrid::cell_at(IVec2::new(-1, 10)), None);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_access_panics() {
        TileGrid::default().get(GRID_SIZE, 0);
    }
}
