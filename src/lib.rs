//! Flappy - A gravity-and-flap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `renderer`: Read-only presentation of simulation state
//! - `platform`: Input latching and frame scheduling
//! - `persistence`: High score storage
//! - `settings`: Playfield, tuning and driver configuration

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use persistence::{HighScoreStore, MemoryStore};
pub use settings::{Settings, Tuning};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::FRAC_PI_3;

    /// Default playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 480.0;
    pub const PLAYFIELD_HEIGHT: f32 = 640.0;

    /// Default simulation rate (one tick per displayed frame at 60 Hz)
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Actor horizontal position as a fraction of playfield width
    pub const ACTOR_X_FRACTION: f32 = 0.2;
    /// Actor visual radius
    pub const ACTOR_SIZE: f32 = 25.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.3;
    /// Velocity set by an impulse (negative = upward)
    pub const LIFT: f32 = -8.0;
    /// Impulse multiplier applied when already moving upward
    pub const UPWARD_BOOST: f32 = 1.1;
    /// Maximum downward speed before drag
    pub const TERMINAL_VELOCITY: f32 = 10.0;
    /// Multiplicative velocity damping per tick (air resistance)
    pub const DRAG: f32 = 0.97;
    /// Rotation per unit of vertical velocity (radians)
    pub const ROTATION_FACTOR: f32 = 0.1;
    /// Rotation limit in either direction
    pub const MAX_ROTATION: f32 = FRAC_PI_3;

    /// Collision half-size as a fraction of the actor's visual radius
    pub const HITBOX_SCALE: f32 = 0.7;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_GAP: f32 = 200.0;
    pub const OBSTACLE_SPEED: f32 = 2.5;
    /// Ticks between obstacle spawns
    pub const SPAWN_INTERVAL: u64 = 100;
    /// Smallest allowed top barrier length
    pub const GAP_TOP_MIN: f32 = 50.0;
    /// Smallest allowed distance between gap bottom and the floor
    pub const GAP_BOTTOM_MARGIN: f32 = 100.0;
}

/// The bounded region the actor and obstacles live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: consts::PLAYFIELD_WIDTH,
            height: consts::PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Actor's fixed horizontal position
    #[inline]
    pub fn actor_x(&self) -> f32 {
        self.width * consts::ACTOR_X_FRACTION
    }
}

/// Tilt for a given vertical velocity, clamped to [-π/3, π/3]
#[inline]
pub fn rotation_for_velocity(vel: f32) -> f32 {
    (vel * consts::ROTATION_FACTOR).clamp(-consts::MAX_ROTATION, consts::MAX_ROTATION)
}
