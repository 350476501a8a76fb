//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::{Aabb, actor_hitbox, hitbox_half_size};
pub use obstacle::Obstacle;
pub use state::{GameEvent, GamePhase, MAX_EVENTS, Simulation};
pub use tick::{handle_input, tick};
