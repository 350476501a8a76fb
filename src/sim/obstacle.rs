//! Gapped obstacles that scroll toward the actor

use glam::Vec2;
use rand::Rng;

use super::actor::Actor;
use super::collision::{Aabb, hitbox_half_size};
use crate::Playfield;
use crate::settings::{Tuning, gap_top_range};

/// A pair of barriers with an opening between them
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom edge of the top barrier
    pub gap_top: f32,
    /// Height of the opening
    pub gap: f32,
    /// Already credited to the score
    pub scored: bool,
    speed: f32,
    floor: f32,
}

impl Obstacle {
    /// Create an obstacle with its gap at a fixed position
    pub fn new(id: u32, x: f32, gap_top: f32, playfield: &Playfield, tuning: &Tuning) -> Self {
        Self {
            id,
            x,
            width: tuning.obstacle_width,
            gap_top,
            gap: tuning.gap,
            scored: false,
            speed: tuning.obstacle_speed,
            floor: playfield.height,
        }
    }

    /// Create an obstacle at `x` with the gap placed uniformly at random so
    /// both barriers keep a minimum length
    pub fn spawn<R: Rng>(id: u32, x: f32, rng: &mut R, playfield: &Playfield, tuning: &Tuning) -> Self {
        let range = gap_top_range(playfield, tuning.gap);
        let gap_top = if range.is_empty() {
            range.start
        } else {
            rng.random_range(range)
        };
        Self::new(id, x, gap_top, playfield, tuning)
    }

    /// Top edge of the bottom barrier
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap
    }

    /// Right edge; scoring happens once this passes the actor
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Scroll left by one tick
    pub fn integrate(&mut self) {
        self.x -= self.speed;
    }

    /// Fully past the left edge of the playfield
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Trailing edge is behind the actor's center
    pub fn passed(&self, actor: &Actor) -> bool {
        self.trailing_edge() < actor.pos.x
    }

    /// The actor's hitbox shares some horizontal span with this obstacle
    pub fn spans_actor(&self, actor: &Actor) -> bool {
        let half = hitbox_half_size(actor.size);
        actor.pos.x + half > self.x && actor.pos.x - half < self.x + self.width
    }

    /// Collision test against the actor's shrunk hitbox
    pub fn overlaps(&self, actor: &Actor) -> bool {
        if !self.spans_actor(actor) {
            return false;
        }
        let half = hitbox_half_size(actor.size);
        actor.pos.y - half < self.gap_top || actor.pos.y + half > self.gap_bottom()
    }

    /// Upper barrier rectangle (ceiling to gap top)
    pub fn top_barrier(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, 0.0),
            Vec2::new(self.x + self.width, self.gap_top),
        )
    }

    /// Lower barrier rectangle (gap bottom to floor)
    pub fn bottom_barrier(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_bottom()),
            Vec2::new(self.x + self.width, self.floor),
        )
    }
}
