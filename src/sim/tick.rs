//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one frame, plus the
//! single input handler that drives phase transitions.

use super::state::{GameEvent, GamePhase, Simulation};

/// Advance the simulation by one tick. Does nothing unless running.
pub fn tick(sim: &mut Simulation) {
    if sim.phase != GamePhase::Running {
        return;
    }

    sim.tick_count += 1;

    if sim.tick_count.is_multiple_of(sim.tuning.spawn_interval) {
        sim.spawn_obstacle();
    }

    sim.actor.integrate();

    // Every obstacle gets the full update even after a collision this tick
    let mut collided = None;
    let mut points = 0;
    for obstacle in &mut sim.obstacles {
        obstacle.integrate();

        if !obstacle.scored && obstacle.passed(&sim.actor) {
            obstacle.scored = true;
            points += 1;
        }

        if collided.is_none() && obstacle.overlaps(&sim.actor) {
            collided = Some(obstacle.id);
        }
    }

    for _ in 0..points {
        sim.award_point();
    }

    sim.obstacles.retain(|o| !o.is_offscreen());

    if let Some(id) = collided {
        log::info!("Collided with obstacle {} at score {}", id, sim.score);
        sim.phase = GamePhase::Over;
        sim.record(GameEvent::Collided { id });
    }
}

/// Apply one activate event (key press or tap).
///
/// The first input starts the round without flapping; input after a game
/// over resets to a fresh round; otherwise the actor flaps.
pub fn handle_input(sim: &mut Simulation) {
    match sim.phase {
        GamePhase::NotStarted => {
            log::info!("Round started");
            sim.phase = GamePhase::Running;
            sim.record(GameEvent::Started);
        }
        GamePhase::Over => sim.reset(),
        GamePhase::Running => {
            sim.actor.impulse();
            sim.record(GameEvent::Impulse);
        }
    }
}
