//! The player-controlled actor and its per-tick controller

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::{Motion, resolve};
use super::geom::Rect;
use super::level::Level;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Life state of the actor within one level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    /// Touched a hazard or enemy; terminal until reset
    Dead,
    /// Reached the goal; terminal until the next level loads
    Won,
}

/// Movement request sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Collision box (smaller than the sprite)
    pub rect: Rect,
    /// Vertical velocity, positive is downward
    pub vel_y: i32,
    /// Supported by a tile or platform after the last tick
    pub grounded: bool,
    /// A jump was started and the button has not been released since
    pub jump_armed: bool,
    /// +1 facing right, -1 facing left
    pub facing: i32,
    /// Any movement input this tick (idle vs running pose)
    pub moving: bool,
    /// Horizontal motion was blocked last tick
    pub blocked: bool,
    pub life: LifeState,
}

impl Actor {
    /// Fresh actor at the fixed spawn point, airborne until the first tick resolves
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::from_origin(tuning.spawn_box_origin(), tuning.actor_size),
            vel_y: 0,
            grounded: false,
            jump_armed: false,
            facing: 1,
            moving: false,
            blocked: false,
            life: LifeState::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    /// Top-left corner of the sprite (collision box minus its inset)
    pub fn sprite_origin(&self, tuning: &Tuning) -> IVec2 {
        self.rect.origin() - tuning.actor_offset
    }

    /// Advance one tick: input, gravity, collision, then overlap checks.
    ///
    /// Collected pickups are removed from `level` and added to `score`.
    /// Returns the life state after the tick.
    pub fn step(
        &mut self,
        intent: Intent,
        level: &mut Level,
        tuning: &Tuning,
        score: &mut u32,
        events: &mut Vec<GameEvent>,
    ) -> LifeState {
        if !self.is_alive() {
            return self.life;
        }

        // Jump fires once per press; holding the button does nothing more
        let jumped = intent.jump && !self.jump_armed && self.grounded;
        if jumped {
            self.vel_y = -tuning.jump_speed;
            self.jump_armed = true;
            events.push(GameEvent::Jumped);
        }
        if !intent.jump {
            self.jump_armed = false;
        }

        let mut dx = 0;
        if intent.left {
            dx -= tuning.move_speed;
            self.facing = -1;
        }
        if intent.right {
            dx += tuning.move_speed;
            self.facing = 1;
        }
        self.moving = jumped || dx != 0;

        self.vel_y = (self.vel_y + tuning.gravity).min(tuning.max_fall_speed);

        let res = resolve(
            &self.rect,
            Motion::new(dx, self.vel_y, self.vel_y),
            level.solid_boxes(),
            &level.platforms,
            tuning.platform_snap_threshold,
        );
        self.rect = self.rect.translated(res.displacement());
        self.vel_y = res.vel_y;
        self.grounded = res.grounded;
        self.blocked = res.hit_wall;

        self.check_overlaps(level, score, events);
        self.life
    }

    /// Hazards, enemies, goal, then pickups
    fn check_overlaps(&mut self, level: &mut Level, score: &mut u32, events: &mut Vec<GameEvent>) {
        let rect = self.rect;

        if level.hazards.iter().any(|h| h.rect.intersects(&rect))
            || level.enemies.iter().any(|e| e.rect().intersects(&rect))
        {
            self.life = LifeState::Dead;
            events.push(GameEvent::Died);
        }

        if self.is_alive() && level.goals.iter().any(|g| g.rect.intersects(&rect)) {
            self.life = LifeState::Won;
            events.push(GameEvent::ReachedGoal);
        }

        level.collectibles.retain(|c| {
            if c.rect.intersects(&rect) {
                *score += 1;
                events.push(GameEvent::Collected { id: c.id });
                false
            } else {
                true
            }
        });
    }
}
