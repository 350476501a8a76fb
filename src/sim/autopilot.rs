//! Idle/demo mode controller
//!
//! Plays the game through the same activate events a player would send:
//! it starts and restarts rounds on its own and flaps whenever the actor
//! sinks below the line it is aiming for.

use super::state::{GamePhase, Simulation};

/// How far below the gap center the actor may sink before flapping
const AIM_BELOW_CENTER: f32 = 30.0;
/// Beyond this distance below the aim line, flap again before the apex
const URGENT_DISTANCE: f32 = 40.0;
/// Velocity at which an urgent re-flap is allowed
const REFLAP_VELOCITY: f32 = -2.0;

/// Whether the autopilot would press the button this frame
pub fn wants_impulse(sim: &Simulation) -> bool {
    match sim.phase {
        GamePhase::NotStarted | GamePhase::Over => true,
        GamePhase::Running => {
            let actor = &sim.actor;
            let below = actor.pos.y - aim_line(sim);
            if below <= 0.0 {
                false
            } else if below > URGENT_DISTANCE {
                actor.vel > REFLAP_VELOCITY
            } else {
                actor.vel >= 0.0
            }
        }
    }
}

/// Target height for the actor: a little under the next gap's center, so a
/// flap's rise stays inside the opening
pub fn aim_line(sim: &Simulation) -> f32 {
    match sim.next_obstacle() {
        Some(o) => (o.gap_top + o.gap_bottom()) / 2.0 + AIM_BELOW_CENTER,
        None => sim.playfield.height / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::settings::Settings;
    use crate::sim::{handle_input, tick};

    #[test]
    fn test_presses_to_start() {
        let sim = Simulation::new(&Settings::default(), Box::new(MemoryStore::new()), 3);
        assert!(wants_impulse(&sim));
    }

    #[test]
    fn test_no_flap_above_aim() {
        let mut sim = Simulation::new(&Settings::default(), Box::new(MemoryStore::new()), 3);
        handle_input(&mut sim);
        sim.actor.pos.y = aim_line(&sim) - 10.0;
        sim.actor.vel = 3.0;
        assert!(!wants_impulse(&sim));
    }

    #[test]
    fn test_waits_for_apex_near_aim() {
        let mut sim = Simulation::new(&Settings::default(), Box::new(MemoryStore::new()), 3);
        handle_input(&mut sim);
        sim.actor.pos.y = aim_line(&sim) + 10.0;
        sim.actor.vel = -1.0;
        assert!(!wants_impulse(&sim));
        sim.actor.vel = 0.5;
        assert!(wants_impulse(&sim));
    }

    #[test]
    fn test_reflaps_when_far_below() {
        let mut sim = Simulation::new(&Settings::default(), Box::new(MemoryStore::new()), 3);
        handle_input(&mut sim);
        sim.actor.pos.y = sim.actor.max_y();
        sim.actor.vel = -1.5;
        assert!(wants_impulse(&sim));
        sim.actor.vel = -6.0;
        assert!(!wants_impulse(&sim));
    }

    #[test]
    fn test_clears_obstacles() {
        let mut sim = Simulation::new(&Settings::default(), Box::new(MemoryStore::new()), 2024);
        for _ in 0..3000 {
            if wants_impulse(&sim) {
                handle_input(&mut sim);
            }
            tick(&mut sim);
        }
        assert!(sim.high_score >= 3, "autopilot only scored {}", sim.high_score);
    }
}
