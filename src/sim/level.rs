//! A playable level derived from a tile grid
//!
//! Everything here is rebuilt atomically from a grid snapshot whenever a level
//! loads or restarts; none of it is persisted.

use rand::Rng;

use super::bodies::{Enemy, MovingBody, StaticBody, StaticKind};
use super::geom::Rect;
use super::tile::{TileGrid, TileRole};
use crate::consts::*;
use crate::tuning::Tuning;

/// Height of a moving platform
pub const PLATFORM_HEIGHT: i32 = 10;

/// Static geometry plus every body spawned from the grid
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: TileGrid,
    pub platforms: Vec<MovingBody>,
    pub enemies: Vec<Enemy>,
    pub hazards: Vec<StaticBody>,
    pub collectibles: Vec<StaticBody>,
    pub goals: Vec<StaticBody>,
}

impl Level {
    /// Spawn bodies for every non-solid tile, in row-major order
    pub fn from_grid(grid: TileGrid, tuning: &Tuning) -> Self {
        let mut platforms = Vec::new();
        let mut enemies = Vec::new();
        let mut hazards = Vec::new();
        let mut collectibles = Vec::new();
        let mut goals = Vec::new();

        let mut next_id = 1;
        for (row, col, code) in grid.iter() {
            let cell = TileGrid::cell_rect(row, col);
            let mut static_body = |kind, rect| {
                let id = next_id;
                next_id += 1;
                StaticBody { id, kind, rect }
            };

            match code.role() {
                TileRole::Empty | TileRole::Solid => {}
                TileRole::Enemy => enemies.push(Enemy::new(cell, tuning)),
                TileRole::Platform(axis) => platforms.push(MovingBody::new(
                    Rect::new(cell.x, cell.y, TILE_SIZE, PLATFORM_HEIGHT),
                    axis,
                    tuning.platform_step,
                    tuning.platform_reach,
                )),
                TileRole::Hazard => {
                    // Spikes fill the lower half of the cell
                    let rect = Rect::new(cell.x, cell.y + TILE_SIZE / 2, TILE_SIZE, TILE_SIZE / 2);
                    hazards.push(static_body(StaticKind::Hazard, rect));
                }
                TileRole::Collectible => {
                    collectibles.push(static_body(StaticKind::Collectible, cell));
                }
                TileRole::Goal => goals.push(static_body(StaticKind::Goal, cell)),
            }
        }

        let level = Self {
            grid,
            platforms,
            enemies,
            hazards,
            collectibles,
            goals,
        };
        log::debug!(
            "Level built: {} solids, {} platforms, {} enemies, {} hazards, {} collectibles, {} goals",
            level.solid_boxes().len(),
            level.platforms.len(),
            level.enemies.len(),
            level.hazards.len(),
            level.collectibles.len(),
            level.goals.len()
        );
        level
    }

    /// Cached solid boxes of the grid
    #[inline]
    pub fn solid_boxes(&self) -> &[Rect] {
        self.grid.solid_boxes()
    }

    /// Move platforms and enemies one tick
    pub fn advance_bodies<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        for platform in &mut self.platforms {
            platform.advance();
        }
        for enemy in &mut self.enemies {
            enemy.advance(rng, tuning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bodies::Axis;
    use crate::sim::tile::TileCode;

    #[test]
    fn test_bodies_spawn_from_codes() {
        let mut grid = TileGrid::default();
        grid.set(5, 5, TileCode::MovingPlatformH);
        grid.set(5, 6, TileCode::MovingPlatformV);
        grid.set(6, 6, TileCode::Enemy);
        grid.set(7, 7, TileCode::Hazard);
        grid.set(8, 8, TileCode::Collectible);
        grid.set(9, 9, TileCode::Goal);

        let level = Level::from_grid(grid, &Tuning::default());
        assert_eq!(level.platforms.len(), 2);
        assert_eq!(level.platforms[0].axis, Axis::Horizontal);
        assert_eq!(level.platforms[1].axis, Axis::Vertical);
        assert_eq!(level.platforms[0].rect, Rect::new(160, 160, 32, PLATFORM_HEIGHT));
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.hazards[0].rect, Rect::new(224, 240, 32, 16));
        assert_eq!(level.collectibles[0].rect, Rect::new(256, 256, 32, 32));
        assert_eq!(level.goals[0].rect, Rect::new(288, 288, 32, 32));
        // Non-solid codes contribute no static geometry
        assert_eq!(level.solid_boxes().len(), 4 * GRID_SIZE - 4);
    }

    #[test]
    fn test_level_keeps_source_grid() {
        let mut grid = TileGrid::default();
        grid.set(12, 7, TileCode::SolidGround);
        grid.set(3, 3, TileCode::Goal);
        let level = Level::from_grid(grid.clone(), &Tuning::default());
        assert_eq!(level.grid, grid);
        assert!(level.solid_boxes().contains(&TileGrid::cell_rect(12, 7)));
        assert_eq!(level.goals[0].kind, StaticKind::Goal);
    }

    #[test]
    fn test_static_body_ids_are_unique() {
        let mut grid = TileGrid::default();
        for col in 2..10 {
            grid.set(4, col, TileCode::Collectible);
        }
        grid.set(5, 2, TileCode::Goal);
        let level = Level::from_grid(grid, &Tuning::default());
        let mut ids: Vec<u32> = level
            .collectibles
            .iter()
            .chain(&level.goals)
            .map(|b| b.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 9);
    }
}
