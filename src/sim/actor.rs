//! The falling player character

use glam::Vec2;

use crate::settings::Tuning;
use crate::{Playfield, rotation_for_velocity};

/// The player's actor
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Position (x is fixed for the lifetime of the actor)
    pub pos: Vec2,
    /// Vertical velocity (positive = downward)
    pub vel: f32,
    /// Tilt in radians, derived from velocity
    pub rotation: f32,
    /// Visual/collision radius
    pub size: f32,
    gravity: f32,
    lift: f32,
    upward_boost: f32,
    terminal_velocity: f32,
    drag: f32,
    floor: f32,
}

impl Actor {
    /// Spawn at rest in the middle of the playfield
    pub fn new(playfield: &Playfield, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(playfield.actor_x(), playfield.height / 2.0),
            vel: 0.0,
            rotation: 0.0,
            size: tuning.actor_size,
            gravity: tuning.gravity,
            lift: tuning.lift,
            upward_boost: tuning.upward_boost,
            terminal_velocity: tuning.terminal_velocity,
            drag: tuning.drag,
            floor: playfield.height,
        }
    }

    /// Advance one tick: gravity, terminal velocity, drag, then clamp to the
    /// playfield. Hitting the floor or ceiling stops the actor dead.
    pub fn integrate(&mut self) {
        self.vel += self.gravity;
        self.vel = self.vel.min(self.terminal_velocity);
        self.vel *= self.drag;
        self.pos.y += self.vel;

        self.rotation = rotation_for_velocity(self.vel);

        if self.pos.y + self.size > self.floor {
            self.pos.y = self.floor - self.size;
            self.vel = 0.0;
        }
        if self.pos.y < self.size {
            self.pos.y = self.size;
            self.vel = 0.0;
        }
    }

    /// Flap upward. Flapping while already rising gets a small boost.
    pub fn impulse(&mut self) {
        let boost = if self.vel < 0.0 { self.upward_boost } else { 1.0 };
        self.vel = self.lift * boost;
    }

    /// Lowest y the actor can reach
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.floor - self.size
    }

    /// Highest y the actor can reach
    #[inline]
    pub fn min_y(&self) -> f32 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn actor() -> Actor {
        Actor::new(&Playfield::default(), &Tuning::default())
    }

    #[test]
    fn test_spawn_position() {
        let a = actor();
        assert_eq!(a.pos, Vec2::new(96.0, 320.0));
        assert_eq!(a.vel, 0.0);
        assert_eq!(a.size, ACTOR_SIZE);
    }

    #[test]
    fn test_integrate_applies_gravity_then_drag() {
        let mut a = actor();
        a.integrate();
        let expected = GRAVITY * DRAG;
        assert!((a.vel - expected).abs() < 1e-6);
        assert!((a.pos.y - (320.0 + expected)).abs() < 1e-4);
    }

    #[test]
    fn test_terminal_velocity_clamped_before_drag() {
        let mut a = actor();
        a.vel = 50.0;
        a.integrate();
        assert!((a.vel - TERMINAL_VELOCITY * DRAG).abs() < 1e-6);
    }

    #[test]
    fn test_integration_is_reproducible() {
        let mut a = actor();
        let mut b = actor();
        a.vel = -3.25;
        b.vel = -3.25;
        for _ in 0..500 {
            a.integrate();
            b.integrate();
            assert_eq!(a.pos.y.to_bits(), b.pos.y.to_bits());
            assert_eq!(a.vel.to_bits(), b.vel.to_bits());
        }
    }

    #[test]
    fn test_floor_stops_dead() {
        let mut a = actor();
        a.pos.y = a.max_y() - 1.0;
        a.vel = 5.0;
        a.integrate();
        assert_eq!(a.pos.y, a.max_y());
        assert_eq!(a.vel, 0.0);
    }

    #[test]
    fn test_ceiling_stops_dead() {
        let mut a = actor();
        a.pos.y = a.min_y() + 1.0;
        a.vel = -8.0;
        a.integrate();
        assert_eq!(a.pos.y, a.min_y());
        assert_eq!(a.vel, 0.0);
    }

    #[test]
    fn test_impulse_from_rest() {
        let mut a = actor();
        a.impulse();
        assert_eq!(a.vel, LIFT);
    }

    #[test]
    fn test_impulse_while_rising_is_boosted() {
        let mut rising = actor();
        rising.vel = -0.5;
        rising.impulse();

        let mut falling = actor();
        falling.vel = 0.5;
        falling.impulse();

        assert!((rising.vel - LIFT * UPWARD_BOOST).abs() < 1e-6);
        assert_eq!(falling.vel, LIFT);
        assert!(rising.vel < falling.vel);
    }

    #[test]
    fn test_rotation_clamped() {
        let mut a = actor();
        a.impulse();
        a.impulse();
        a.integrate();
        assert!(a.rotation >= -MAX_ROTATION);
        a.vel = 100.0;
        a.integrate();
        assert!(a.rotation <= MAX_ROTATION);
    }

    proptest! {
        #[test]
        fn prop_actor_stays_in_bounds(
            y in 0.0f32..640.0,
            vel in -30.0f32..30.0,
            flaps in proptest::collection::vec(any::<bool>(), 1..300),
        ) {
            let mut a = actor();
            a.pos.y = y.clamp(a.min_y(), a.max_y());
            a.vel = vel;
            for flap in flaps {
                if flap {
                    a.impulse();
                }
                let unclamped = a.pos.y + (a.vel + GRAVITY).min(TERMINAL_VELOCITY) * DRAG;
                a.integrate();
                prop_assert!(a.pos.y >= a.min_y() && a.pos.y <= a.max_y());
                if unclamped > a.max_y() || unclamped < a.min_y() {
                    prop_assert_eq!(a.vel, 0.0);
                }
            }
        }

        #[test]
        fn prop_boost_strictly_stronger(up in -20.0f32..-0.001, down in 0.0f32..20.0) {
            let mut rising = actor();
            rising.vel = up;
            rising.impulse();
            let mut falling = actor();
            falling.vel = down;
            falling.impulse();
            prop_assert!(rising.vel < falling.vel);
        }
    }
}
