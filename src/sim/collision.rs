//! Collision geometry
//!
//! The actor collides with a shrunk square hitbox rather than its full
//! visual circle, and obstacles are a pair of axis-aligned barrier
//! rectangles. Comparisons are strict: touching edges do not collide.

use glam::Vec2;

use super::actor::Actor;
use crate::consts::HITBOX_SCALE;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half` in each direction
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Horizontal spans strictly overlap
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }

    /// Vertical spans strictly overlap
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.min.y < other.max.y && self.max.y > other.min.y
    }

    /// Boxes strictly overlap (shared edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// Half-size of the actor's collision box
#[inline]
pub fn hitbox_half_size(size: f32) -> f32 {
    size * HITBOX_SCALE
}

/// The actor's shrunk collision box
pub fn actor_hitbox(actor: &Actor) -> Aabb {
    let half = hitbox_half_size(actor.size);
    Aabb::from_center(actor.pos, Vec2::splat(half))
}
