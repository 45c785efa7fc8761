//! Presentation helpers
//!
//! Everything a frontend needs to draw a frame, without drawing it: HUD text,
//! the background index, and a flat sprite list in draw order.

use glam::IVec2;

use crate::consts::BACKGROUND_COUNT;
use crate::sim::{Axis, GameState, StaticKind, TileCode, TileGrid, TileRole};

/// Heads-up display contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub level: String,
    /// Index into the background images
    pub background: u32,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: format!("X {}", state.score),
            level: format!("Level {}", state.level_id),
            background: background_index(state.level_id),
        }
    }
}

/// Backgrounds rotate with the level id
pub fn background_index(level_id: u32) -> u32 {
    level_id % BACKGROUND_COUNT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Tile(TileCode),
    Platform,
    Enemy,
    Hazard,
    Collectible,
    Goal,
    Actor,
}

impl From<StaticKind> for SpriteKind {
    fn from(kind: StaticKind) -> Self {
        match kind {
            StaticKind::Hazard => SpriteKind::Hazard,
            StaticKind::Collectible => SpriteKind::Collectible,
            StaticKind::Goal => SpriteKind::Goal,
        }
    }
}

/// One image placed at a pixel origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub origin: IVec2,
    /// Mirror horizontally (actor facing left)
    pub flip: bool,
}

impl Sprite {
    fn at(kind: SpriteKind, origin: IVec2) -> Self {
        Self {
            kind,
            origin,
            flip: false,
        }
    }
}

/// Sprites for one frame: solid tiles, bodies, then the actor on top
pub fn scene(state: &GameState) -> Vec<Sprite> {
    let level = &state.level;
    let mut sprites = Vec::new();

    for (row, col, code) in level.grid.iter() {
        if code.is_solid() {
            let origin = TileGrid::cell_rect(row, col).origin();
            sprites.push(Sprite::at(SpriteKind::Tile(code), origin));
        }
    }

    sprites.extend(
        level
            .platforms
            .iter()
            .map(|p| Sprite::at(SpriteKind::Platform, p.rect.origin())),
    );
    sprites.extend(
        level
            .enemies
            .iter()
            .map(|e| Sprite::at(SpriteKind::Enemy, e.rect().origin())),
    );
    let statics = level.hazards.iter().chain(&level.collectibles).chain(&level.goals);
    sprites.extend(statics.map(|b| Sprite::at(b.kind.into(), b.rect.origin())));

    sprites.push(Sprite {
        kind: SpriteKind::Actor,
        origin: state.actor.sprite_origin(&state.tuning),
        flip: state.actor.facing < 0,
    });
    sprites
}

/// One character per cell, rows separated by newlines
pub fn grid_ascii(grid: &TileGrid) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size * (size + 1));
    for row in 0..size {
        for col in 0..size {
            out.push(tile_char(grid.get(row, col)));
        }
        out.push('\n');
    }
    out
}

fn tile_char(code: TileCode) -> char {
    match code.role() {
        TileRole::Empty => '.',
        TileRole::Solid if code == TileCode::SolidGround => '#',
        TileRole::Solid => '=',
        TileRole::Enemy => 'E',
        TileRole::Platform(Axis::Horizontal) => '-',
        TileRole::Platform(Axis::Vertical) => '|',
        TileRole::Hazard => '^',
        TileRole::Collectible => 'o',
        TileRole::Goal => 'G',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_SIZE, TILE_SIZE};
    use crate::tuning::Tuning;

    fn state_with(cells: &[(usize, usize, TileCode)], level_id: u32) -> GameState {
        let mut grid = TileGrid::default();
        for &(row, col, code) in cells {
            grid.set(row, col, code);
        }
        GameState::new(grid, level_id, Tuning::default(), 0)
    }

    #[test]
    fn test_hud_text() {
        let mut state = state_with(&[], 9);
        state.score = 4;
        let hud = Hud::from_state(&state);
        assert_eq!(hud.score, "X 4");
        assert_eq!(hud.level, "Level 9");
        assert_eq!(hud.background, 2);
    }

    #[test]
    fn test_background_wraps() {
        assert_eq!(background_index(0), 0);
        assert_eq!(background_index(7), 0);
        assert_eq!(background_index(11), 4);
    }

    #[test]
    fn test_scene_draws_actor_last() {
        let state = state_with(
            &[(10, 10, TileCode::Goal), (12, 4, TileCode::Enemy)],
            1,
        );
        let sprites = scene(&state);
        let actor = sprites.last().unwrap();
        assert_eq!(actor.kind, SpriteKind::Actor);
        assert_eq!(actor.origin, state.actor.sprite_origin(&state.tuning));
        assert!(sprites.iter().any(|s| s.kind == SpriteKind::Goal));
        assert!(sprites.iter().any(|s| s.kind == SpriteKind::Enemy));

        let tiles = sprites
            .iter()
            .filter(|s| matches!(s.kind, SpriteKind::Tile(_)))
            .count();
        // Boundary ring of a default grid
        assert_eq!(tiles, 4 * GRID_SIZE - 4);
    }

    #[test]
    fn test_static_bodies_drawn_by_kind() {
        let state = state_with(
            &[
                (20, 3, TileCode::Hazard),
                (20, 4, TileCode::Collectible),
                (20, 5, TileCode::Goal),
            ],
            1,
        );
        let sprites = scene(&state);
        let hazard = TileGrid::cell_rect(20, 3);
        assert!(sprites.contains(&Sprite::at(
            SpriteKind::Hazard,
            IVec2::new(hazard.x, hazard.y + TILE_SIZE / 2)
        )));
        assert!(sprites.contains(&Sprite::at(
            SpriteKind::Collectible,
            TileGrid::cell_rect(20, 4).origin()
        )));
        assert!(sprites.contains(&Sprite::at(
            SpriteKind::Goal,
            TileGrid::cell_rect(20, 5).origin()
        )));
    }

    #[test]
    fn test_grid_ascii_shape() {
        let mut grid = TileGrid::default();
        grid.set(5, 6, TileCode::Goal);
        let text = grid_ascii(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), GRID_SIZE);
        assert!(lines[0].chars().all(|c| c == '#'));
        assert!(lines[GRID_SIZE - 1].starts_with('='));
        assert_eq!(lines[5].chars().nth(6), Some('G'));
    }
}
