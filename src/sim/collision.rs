//! Collision resolution against tiles and moving platforms
//!
//! The resolver takes the displacement the actor wants this tick and trims it
//! so the actor never ends up inside solid geometry. Static tiles are resolved
//! exactly, one axis at a time; moving platforms use a looser proximity check
//! that copes with bodies that moved underneath the actor since the last tick.

use glam::IVec2;

use super::bodies::MovingBody;
use super::geom::Rect;

/// Displacement the actor requests for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Motion {
    /// Requested displacement (y grows downward)
    pub delta: IVec2,
    /// Current vertical velocity; its sign tells ceiling hits from landings
    pub vel_y: i32,
}

impl Motion {
    pub fn new(dx: i32, dy: i32, vel_y: i32) -> Self {
        Self {
            delta: IVec2::new(dx, dy),
            vel_y,
        }
    }
}

/// Outcome of resolving one tick of motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Corrected displacement
    pub delta: IVec2,
    /// Vertical velocity after ceiling/floor contacts
    pub vel_y: i32,
    /// Standing on a tile or platform this tick
    pub grounded: bool,
    /// Extra displacement from riding a horizontal platform
    pub carry: IVec2,
    /// Horizontal motion was blocked
    pub hit_wall: bool,
}

impl Resolution {
    /// Resolution that leaves the actor where it is
    pub fn still(vel_y: i32) -> Self {
        Self {
            vel_y,
            ..Default::default()
        }
    }

    /// Total displacement to apply to the actor
    #[inline]
    pub fn displacement(&self) -> IVec2 {
        self.delta + self.carry
    }
}

/// Resolve a tick of motion against static tiles, then moving platforms
pub fn resolve(
    actor: &Rect,
    motion: Motion,
    solids: &[Rect],
    platforms: &[MovingBody],
    platform_threshold: i32,
) -> Resolution {
    if actor.is_degenerate() {
        return Resolution::still(motion.vel_y);
    }
    let resolution = resolve_static(actor, motion, solids);
    resolve_platforms(actor, resolution, platforms, platform_threshold)
}

/// Separated-axis pass against full-tile solid boxes
///
/// Each axis is tested from the actor's current position, so sliding along a
/// wall while falling works. Thin diagonal gaps can be skipped through; with
/// grid-aligned tiles and small per-tick speeds that never happens in practice.
pub fn resolve_static(actor: &Rect, motion: Motion, solids: &[Rect]) -> Resolution {
    let mut res = Resolution {
        delta: motion.delta,
        vel_y: motion.vel_y,
        ..Default::default()
    };
    if actor.is_degenerate() {
        return Resolution::still(motion.vel_y);
    }

    for solid in solids {
        if actor.translated(IVec2::new(res.delta.x, 0)).intersects(solid) {
            res.delta.x = 0;
            res.hit_wall = true;
        }

        if actor.translated(IVec2::new(0, res.delta.y)).intersects(solid) {
            if res.vel_y < 0 {
                // Jumping into the underside of a tile
                res.delta.y = solid.bottom() - actor.top();
            } else {
                // Falling onto the top of a tile
                res.delta.y = solid.top() - actor.bottom();
                res.grounded = true;
            }
            res.vel_y = 0;
        }
    }

    res
}

/// Proximity pass against moving platforms
///
/// A platform may have moved into the actor since the last tick, so exact
/// clamping would misjudge which side was hit. Instead the projected edge
/// nearest to a platform edge (within `threshold`) decides the side.
pub fn resolve_platforms(
    actor: &Rect,
    mut res: Resolution,
    platforms: &[MovingBody],
    threshold: i32,
) -> Resolution {
    if actor.is_degenerate() {
        return res;
    }

    for platform in platforms {
        let rect = &platform.rect;

        if actor.translated(IVec2::new(res.delta.x, 0)).intersects(rect) {
            res.delta.x = 0;
            res.hit_wall = true;
        }

        if actor.translated(IVec2::new(0, res.delta.y)).intersects(rect) {
            let projected_top = actor.top() + res.delta.y;
            let projected_bottom = actor.bottom() + res.delta.y;

            if (projected_top - rect.bottom()).abs() < threshold {
                // Hit from below
                res.vel_y = 0;
                res.delta.y = rect.bottom() - actor.top();
            } else if (projected_bottom - rect.top()).abs() < threshold {
                // Landed on top, one unit clear so walking off never snags
                res.delta.y = rect.top() - 1 - actor.bottom();
                res.grounded = true;
                res.carry += platform.carry();
            }
        }
    }

    res
}
