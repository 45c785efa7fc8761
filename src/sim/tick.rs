//! Fixed timestep simulation tick
//!
//! Core game loop that advances the level deterministically by one frame.

use super::actor::Intent;
use super::geom::Rect;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Jump held (the actor detects the press edge)
    pub jump: bool,
    /// Demo mode - the simulation steers the actor itself
    pub autopilot: bool,
}

impl TickInput {
    pub fn intent(&self) -> Intent {
        Intent {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking
    Continue,
    /// Actor died; call `reset_level` to retry
    Failed,
    /// Goal reached; call `advance_level`
    Completed,
    /// Run finished; only `restart` leaves this
    AllLevelsCompleted,
}

impl From<GamePhase> for TickOutcome {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Playing => TickOutcome::Continue,
            GamePhase::Failed => TickOutcome::Failed,
            GamePhase::Completed => TickOutcome::Completed,
            GamePhase::AllLevelsCompleted => TickOutcome::AllLevelsCompleted,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    state.events.clear();

    // Terminal phases hold until the caller resets or advances
    if state.phase != GamePhase::Playing {
        return state.phase.into();
    }

    state.time_ticks += 1;

    // Bodies move first so the actor resolves against this tick's positions
    state.level.advance_bodies(&mut state.rng, &state.tuning);

    let intent = if input.autopilot {
        autopilot_intent(state)
    } else {
        input.intent()
    };

    state.actor.step(
        intent,
        &mut state.level,
        &state.tuning,
        &mut state.score,
        &mut state.events,
    );
    state.sync_phase();

    state.phase.into()
}

/// Look-ahead distance for walls and hazards in demo mode
const AUTOPILOT_LOOKAHEAD: i32 = 48;

/// Walk toward the goal and hop over anything in the way
fn autopilot_intent(state: &GameState) -> Intent {
    let actor = &state.actor;
    let center_x = actor.rect.x + actor.rect.w / 2;

    let target_x = state
        .level
        .goals
        .first()
        .map(|g| g.rect.x + g.rect.w / 2)
        .unwrap_or(i32::MAX);
    let dir = if target_x < center_x { -1 } else { 1 };

    let rect = &actor.rect;
    let ahead_x = if dir > 0 {
        rect.right()
    } else {
        rect.left() - AUTOPILOT_LOOKAHEAD
    };
    let ahead = Rect::new(ahead_x, rect.y, AUTOPILOT_LOOKAHEAD, rect.h);
    let danger_ahead = state.level.hazards.iter().any(|h| h.rect.intersects(&ahead))
        || state.level.enemies.iter().any(|e| e.rect().intersects(&ahead));

    // Release after every jump so the next press registers
    let want_jump = actor.blocked || danger_ahead;
    Intent {
        left: dir < 0,
        right: dir > 0,
        jump: want_jump && !actor.jump_armed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::{LevelStore, MemoryLevelStore};
    use crate::sim::actor::LifeState;
    use crate::sim::bodies::{Axis, MovingBody};
    use crate::sim::state::GameEvent;
    use crate::sim::tile::{TileCode, TileGrid};
    use crate::tuning::Tuning;

    fn state_with(cells: &[(usize, usize, TileCode)]) -> GameState {
        let mut grid = TileGrid::default();
        for &(row, col, code) in cells {
            grid.set(row, col, code);
        }
        GameState::new(grid, 1, Tuning::default(), 12345)
    }

    #[test]
    fn test_goal_reports_completed() {
        // Goal right where the actor spawns
        let mut state = state_with(&[(28, 3, TileCode::Goal)]);
        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome, TickOutcome::Completed);
        assert_eq!(state.actor.life, LifeState::Won);
        assert!(state.events.contains(&GameEvent::ReachedGoal));

        // Holds until the caller advances
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Completed);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_completion_walks_through_levels() {
        let mut store = MemoryLevelStore::new();
        let mut grid = TileGrid::default();
        grid.set(28, 3, TileCode::Goal);
        store.save(1, &grid).unwrap();
        store.save(2, &grid).unwrap();
        let tuning = Tuning {
            max_level: 2,
            ..Default::default()
        };
        let mut state = GameState::load(&store, tuning, 7).unwrap();

        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Completed);
        state.advance_level(&store).unwrap();
        assert_eq!(state.level_id, 2);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Completed);
        state.advance_level(&store).unwrap();
        assert_eq!(
            tick(&mut state, &TickInput::default()),
            TickOutcome::AllLevelsCompleted
        );

        state.restart(&store).unwrap();
        assert_eq!(state.level_id, 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_failed_then_reset_restores_level() {
        let mut state = state_with(&[(28, 3, TileCode::Hazard), (27, 8, TileCode::Collectible)]);
        let walk_right = TickInput {
            right: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &walk_right), TickOutcome::Failed);
        assert_eq!(tick(&mut state, &walk_right), TickOutcome::Failed);

        state.reset_level();
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.actor.is_alive());
        assert_eq!(state.actor.rect.origin(), state.tuning.spawn_box_origin());
        assert_eq!(state.level.collectibles.len(), 1);
    }

    #[test]
    fn test_collectible_scores_once_per_attempt() {
        let mut state = state_with(&[(28, 5, TileCode::Collectible)]);
        let walk_right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut state, &walk_right);
        }
        assert_eq!(state.score, 1);
        assert!(state.level.collectibles.is_empty());
        let walk_left = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..40 {
            tick(&mut state, &walk_left);
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_rider_tracks_horizontal_platform() {
        let mut state = state_with(&[]);
        // Platform well above the floor, actor resting on it
        let platform = MovingBody::new(Rect::new(320, 640, TILE_SIZE, 10), Axis::Horizontal, 1, 50);
        state.level.platforms.push(platform);
        state.actor.rect.x = 326;
        state.actor.rect.y = 640 - 1 - state.actor.rect.h;
        state.actor.vel_y = 10;

        let idle = TickInput::default();
        tick(&mut state, &idle);
        for _ in 0..150 {
            let before_actor = state.actor.rect.x;
            let before_platform = state.level.platforms[0].rect.x;
            tick(&mut state, &idle);
            assert!(state.actor.grounded);
            let platform_step = state.level.platforms[0].rect.x - before_platform;
            assert_eq!(state.actor.rect.x - before_actor, platform_step);
            assert_eq!(state.actor.rect.bottom(), state.level.platforms[0].rect.top() - 1);
        }
    }

    #[test]
    fn test_rider_follows_vertical_platform() {
        let mut state = state_with(&[]);
        let platform = MovingBody::new(Rect::new(320, 640, TILE_SIZE, 10), Axis::Vertical, 1, 50);
        state.level.platforms.push(platform);
        state.actor.rect.x = 326;
        state.actor.rect.y = 640 - 1 - state.actor.rect.h;
        state.actor.vel_y = 10;

        let idle = TickInput::default();
        for _ in 0..120 {
            tick(&mut state, &idle);
            assert!(state.actor.grounded);
            assert_eq!(state.actor.rect.x, 326);
            assert_eq!(state.actor.rect.bottom(), state.level.platforms[0].rect.top() - 1);
        }
    }

    #[test]
    fn test_determinism() {
        let mut store = MemoryLevelStore::new();
        let mut grid = TileGrid::default();
        for col in 6..20 {
            grid.set(20, col, TileCode::Enemy);
        }
        grid.set(27, 12, TileCode::SolidGround);
        store.save(1, &grid).unwrap();

        let mut state1 = GameState::load(&store, Tuning::default(), 99999).unwrap();
        let mut state2 = GameState::load(&store, Tuning::default(), 99999).unwrap();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.actor, state2.actor);
        assert_eq!(state1.level.enemies, state2.level.enemies);
    }

    #[test]
    fn test_autopilot_hops_wall() {
        let mut state = state_with(&[(28, 6, TileCode::SolidGround)]);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &input);
        }
        assert!(state.actor.rect.x > 7 * TILE_SIZE);
    }

    #[test]
    fn test_autopilot_reaches_goal() {
        let mut state = state_with(&[(28, 12, TileCode::Goal)]);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut outcome = TickOutcome::Continue;
        for _ in 0..300 {
            outcome = tick(&mut state, &input);
            if outcome != TickOutcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Completed);
    }

    #[test]
    fn test_single_tile_scenario() {
        let mut state = state_with(&[(10, 5, TileCode::SolidGround)]);
        let tile = TileGrid::cell_rect(10, 5);
        state.actor.rect.x = tile.x + 6;
        state.actor.rect.y = tile.y - 200;
        for _ in 0..90 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.actor.vel_y, 0);
        assert!(state.actor.grounded);
        assert_eq!(state.actor.rect.bottom(), tile.top());
    }
}
