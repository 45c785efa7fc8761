//! Dynamic and static bodies spawned from tile codes
//!
//! Each kind lives in its own homogeneous collection on the level, since the
//! resolver treats every kind differently.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::tuning::Tuning;

/// Motion axis of a moving body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    #[inline]
    pub fn unit(self) -> IVec2 {
        match self {
            Axis::Horizontal => IVec2::X,
            Axis::Vertical => IVec2::Y,
        }
    }
}

/// A rectangle patrolling back and forth along one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingBody {
    pub rect: Rect,
    pub axis: Axis,
    /// Distance covered per tick
    pub step: i32,
    /// +1 or -1
    pub direction: i32,
    /// Signed tick counter; the body turns around once it exceeds `reach`
    pub travel: i32,
    pub reach: i32,
    /// Displacement applied during the most recent tick
    pub last_step: IVec2,
}

impl MovingBody {
    pub fn new(rect: Rect, axis: Axis, step: i32, reach: i32) -> Self {
        Self {
            rect,
            axis,
            step,
            direction: 1,
            travel: 0,
            reach,
            last_step: IVec2::ZERO,
        }
    }

    /// Move one step and reverse at the travel bound
    pub fn advance(&mut self) {
        let delta = self.axis.unit() * (self.step * self.direction);
        self.rect = self.rect.translated(delta);
        self.last_step = delta;

        self.travel += 1;
        if self.travel.abs() > self.reach {
            self.direction = -self.direction;
            self.travel = -self.travel;
        }
    }

    /// Ticks spent moving in one direction between two reversals.
    /// The first leg starts mid-sweep, so the body repeats every `2 * travel_bound` ticks.
    pub fn travel_bound(&self) -> i32 {
        2 * (self.reach + 1)
    }

    /// Signed horizontal displacement carried onto a rider this tick
    pub fn carry(&self) -> IVec2 {
        match self.axis {
            Axis::Horizontal => self.last_step,
            Axis::Vertical => IVec2::ZERO,
        }
    }
}

/// A walking enemy that pauses at random
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: MovingBody,
    /// Remaining ticks of the current pause
    pub idle_ticks: u32,
}

impl Enemy {
    pub fn new(rect: Rect, tuning: &Tuning) -> Self {
        Self {
            body: MovingBody::new(rect, Axis::Horizontal, tuning.enemy_step, tuning.enemy_reach),
            idle_ticks: 0,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn is_idle(&self) -> bool {
        self.idle_ticks > 0
    }

    /// Walk or rest for one tick
    pub fn advance<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        if self.idle_ticks > 0 {
            self.idle_ticks -= 1;
            self.body.last_step = IVec2::ZERO;
            return;
        }

        self.body.advance();
        let roll = rng.random_range(0..=tuning.enemy_idle_roll_max);
        if roll >= tuning.enemy_idle_roll_trigger {
            self.idle_ticks = roll / 5;
        }
    }
}

/// Kind tag of a body that only reports overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaticKind {
    Hazard,
    Collectible,
    Goal,
}

/// A non-solid body resolved by a pure overlap test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticBody {
    pub id: u32,
    pub kind: StaticKind,
    pub rect: Rect,
}
