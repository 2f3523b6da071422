//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick of motion per call)
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (insertion order, ids never reused)
//! - No rendering, audio or filesystem dependencies

pub mod autopilot;
pub mod collision;
pub mod fleet;
mod progression;
pub mod projectiles;
pub mod rect;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{HitReport, find_projectile_hits, resolve_projectile_hits, ship_hit_detected};
pub use fleet::{Fleet, check_edges, layout_fleet};
pub use projectiles::{AtCapacity, ProjectilePool};
pub use rect::Rect;
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, GameStats, Projectile, SessionSummary, Ship,
};
pub use tick::{TickInput, tick};
