//! Game state and session flow
//!
//! `GameState` owns everything that changes during play: the current level,
//! the actor, the score and the RNG driving enemy pauses. There is no other
//! mutable game state anywhere.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, LifeState};
use super::level::Level;
use super::tile::TileGrid;
use crate::persistence::{LevelError, LevelStore};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Actor alive, level in progress
    Playing,
    /// Actor died; waiting for a reset
    Failed,
    /// Goal reached; waiting for the next level
    Completed,
    /// Last level completed; waiting for a restart
    AllLevelsCompleted,
}

/// One-shot notifications emitted during a tick (audio cues, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump started
    Jumped,
    /// A collectible with this id was consumed
    Collected { id: u32 },
    /// Touched a hazard or enemy
    Died,
    /// Touched the goal
    ReachedGoal,
    /// A level (re)started
    LevelStarted { level: u32 },
    /// Completed the final level
    AllLevelsCompleted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current level id (1-based)
    pub level_id: u32,
    /// Collectibles consumed this run
    pub score: u32,
    /// Ticks simulated in the current attempt
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Grid snapshot the current level was built from
    pub grid: TileGrid,
    pub level: Level,
    pub actor: Actor,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
    /// Enemy pause rolls, reseeded on every level start
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a run on `level_id` with an already-loaded grid
    pub fn new(grid: TileGrid, level_id: u32, tuning: Tuning, seed: u64) -> Self {
        let level = Level::from_grid(grid.clone(), &tuning);
        let actor = Actor::spawn(&tuning);
        let mut state = Self {
            seed,
            level_id,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            grid,
            level,
            actor,
            events: Vec::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_level();
        state
    }

    /// Start a run on the first level from `store`
    pub fn load(store: &impl LevelStore, tuning: Tuning, seed: u64) -> Result<Self, LevelError> {
        let first = tuning.first_level;
        Self::load_at(store, first, tuning, seed)
    }

    /// Start a run on an arbitrary level (clamped to the playable range)
    pub fn load_at(
        store: &impl LevelStore,
        level_id: u32,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, LevelError> {
        let level_id = level_id.max(tuning.first_level).min(tuning.max_level);
        let grid = store.load(level_id)?;
        Ok(Self::new(grid, level_id, tuning, seed))
    }

    /// Rebuild the level from the stored grid and respawn the actor
    pub fn reset_level(&mut self) {
        self.level = Level::from_grid(self.grid.clone(), &self.tuning);
        self.actor = Actor::spawn(&self.tuning);
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(u64::from(self.level_id)));
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted {
            level: self.level_id,
        });
        log::info!("Level {} started", self.level_id);
    }

    /// Move to the next level, or end the run after the last one.
    ///
    /// Returns the phase after advancing: `Playing` on the new level or
    /// `AllLevelsCompleted`.
    pub fn advance_level(&mut self, store: &impl LevelStore) -> Result<GamePhase, LevelError> {
        let next = self.level_id + 1;
        if self.tuning.is_past_last_level(next) {
            log::info!("All {} levels completed with score {}", self.tuning.max_level, self.score);
            self.level_id = self.tuning.max_level;
            self.phase = GamePhase::AllLevelsCompleted;
            self.events.push(GameEvent::AllLevelsCompleted);
            return Ok(self.phase);
        }

        self.grid = store.load(next)?;
        self.level_id = next;
        self.reset_level();
        Ok(self.phase)
    }

    /// Start a new run from the first level
    pub fn restart(&mut self, store: &impl LevelStore) -> Result<(), LevelError> {
        let first = self.tuning.first_level;
        self.grid = store.load(first)?;
        self.level_id = first;
        self.score = 0;
        self.reset_level();
        Ok(())
    }

    /// Derive the phase from the actor after a tick
    pub(crate) fn sync_phase(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match self.actor.life {
            LifeState::Alive => {}
            LifeState::Dead => {
                log::info!("Level {} failed after {} ticks", self.level_id, self.time_ticks);
                self.phase = GamePhase::Failed;
            }
            LifeState::Won => {
                log::info!("Level {} completed after {} ticks", self.level_id, self.time_ticks);
                self.phase = GamePhase::Completed;
            }
        }
    }
}
