//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Integer pixel geometry
//! - No rendering or platform dependencies

pub mod actor;
pub mod bodies;
pub mod collision;
pub mod geom;
pub mod level;
pub mod state;
pub mod tick;
pub mod tile;

pub use actor::{Actor, Intent, LifeState};
pub use bodies::{Axis, Enemy, MovingBody, StaticBody, StaticKind};
pub use collision::{Motion, Resolution, resolve, resolve_platforms, resolve_static};
pub use geom::Rect;
pub use level::{Level, PLATFORM_HEIGHT};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, tick};
pub use tile::{TileCode, TileGrid, TileRole};
