//! Game state and core simulation types
//!
//! Everything a tick touches is owned by [`Simulation`]. Renderers get a
//! shared borrow; only [`super::tick`] and [`super::handle_input`] mutate.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::collision::hitbox_half_size;
use super::obstacle::Obstacle;
use crate::persistence::HighScoreStore;
use crate::settings::{Settings, Tuning};
use crate::Playfield;

/// Events kept between drains; the oldest are dropped beyond this
pub const MAX_EVENTS: usize = 256;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first input
    NotStarted,
    /// Active gameplay
    Running,
    /// Actor hit an obstacle; next input resets
    Over,
}

/// Notable things that happened since the events were last drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Impulse,
    Spawned { id: u32 },
    Scored { score: u32 },
    NewHighScore { score: u32 },
    Collided { id: u32 },
    Reset,
}

/// Complete game state
///
/// Ticks record [`GameEvent`]s. Drivers should call
/// [`Simulation::drain_events`] once per frame; undrained events are capped
/// at [`MAX_EVENTS`] and the oldest are discarded.
#[derive(Debug)]
pub struct Simulation {
    /// Seed the RNG was created from
    pub seed: u64,
    pub playfield: Playfield,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub actor: Actor,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub high_score: u32,
    /// Ticks since the last (re)start
    pub tick_count: u64,
    pub(super) rng: Pcg32,
    pub(super) store: Box<dyn HighScoreStore>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Simulation {
    /// Create a simulation waiting for its first input. The high score is
    /// read from `store` once, here.
    pub fn new(settings: &Settings, mut store: Box<dyn HighScoreStore>, seed: u64) -> Self {
        let high_score = store.load();
        log::info!(
            "New simulation: {}x{} playfield, seed {}, high score {}",
            settings.playfield.width,
            settings.playfield.height,
            seed,
            high_score
        );
        Self {
            seed,
            playfield: settings.playfield,
            tuning: settings.tuning,
            phase: GamePhase::NotStarted,
            actor: Actor::new(&settings.playfield, &settings.tuning),
            obstacles: Vec::new(),
            score: 0,
            high_score,
            tick_count: 0,
            rng: Pcg32::seed_from_u64(seed),
            store,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an obstacle at the right edge with a random gap
    pub fn spawn_obstacle(&mut self) -> u32 {
        let id = self.next_obstacle_id();
        let obstacle = Obstacle::spawn(
            id,
            self.playfield.width,
            &mut self.rng,
            &self.playfield,
            &self.tuning,
        );
        log::debug!("Spawned obstacle {} with gap at {:.1}", id, obstacle.gap_top);
        self.obstacles.push(obstacle);
        self.record(GameEvent::Spawned { id });
        id
    }

    /// Credit one point, raising and persisting the high score if beaten
    pub(super) fn award_point(&mut self) {
        self.score += 1;
        self.record(GameEvent::Scored { score: self.score });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
            self.record(GameEvent::NewHighScore {
                score: self.high_score,
            });
        }
        debug_assert!(self.score <= self.high_score);
    }

    /// Back to a fresh, unstarted round. The high score and RNG carry over.
    pub fn reset(&mut self) {
        log::info!("Reset after scoring {} (best {})", self.score, self.high_score);
        self.actor = Actor::new(&self.playfield, &self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.tick_count = 0;
        self.phase = GamePhase::NotStarted;
        self.record(GameEvent::Reset);
    }

    pub(super) fn record(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// First obstacle the actor's hitbox has not fully cleared yet
    pub fn next_obstacle(&self) -> Option<&Obstacle> {
        let half = hitbox_half_size(self.actor.size);
        self.obstacles
            .iter()
            .find(|o| o.trailing_edge() + half >= self.actor.pos.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_new_loads_high_score() {
        let store = MemoryStore::with_value(17);
        let sim = Simulation::new(&Settings::default(), Box::new(store), 1);
        assert_eq!(sim.high_score, 17);
        assert_eq!(sim.score, 0);
        assert_eq!(sim.phase, GamePhase::NotStarted);
        assert!(sim.obstacles.is_empty());
    }

    #[test]
    fn test_award_point_persists_only_new_records() {
        let store = MemoryStore::with_value(1);
        let mut sim = Simulation::new(&Settings::default(), Box::new(store.clone()), 1);
        sim.award_point();
        assert_eq!(sim.high_score, 1);
        assert_eq!(store.save_count(), 0);
        sim.award_point();
        assert_eq!(sim.high_score, 2);
        assert_eq!(store.value(), Some(2));
        assert_eq!(store.save_count(), 1);
        assert_eq!(
            sim.drain_events(),
            vec![
                GameEvent::Scored { score: 1 },
                GameEvent::Scored { score: 2 },
                GameEvent::NewHighScore { score: 2 },
            ]
        );
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut sim = Simulation::new(&Settings::default(), Box::new(MemoryStore::new()), 1);
        for _ in 0..MAX_EVENTS + 10 {
            sim.spawn_obstacle();
        }
        let events = sim.drain_events();
        assert_eq!(events.len(), MAX_EVENTS);
        // Oldest dropped first
        assert_eq!(events[0], GameEvent::Spawned { id: 11 });
        assert_eq!(
            events[MAX_EVENTS - 1],
            GameEvent::Spawned { id: MAX_EVENTS as u32 + 10 }
        );
    }

    #[test]
    fn test_obstacle_ids_are_unique() {
        let mut sim = Simulation::new(&Settings::default(), Box::new(MemoryStore::new()), 1);
        let a = sim.spawn_obstacle();
        let b = sim.spawn_obstacle();
        assert_ne!(a, b);
        assert_eq!(sim.obstacles.len(), 2);
        assert_eq!(sim.obstacles[0].x, sim.playfield.width);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut sim = Simulation::new(&Settings::default(), Box::new(MemoryStore::new()), 1);
        sim.phase = GamePhase::Over;
        sim.award_point();
        sim.spawn_obstacle();
        sim.tick_count = 42;
        sim.actor.pos.y = 100.0;
        sim.reset();
        assert_eq!(sim.phase, GamePhase::NotStarted);
        assert_eq!(sim.score, 0);
        assert_eq!(sim.high_score, 1);
        assert_eq!(sim.tick_count, 0);
        assert!(sim.obstacles.is_empty());
        assert_eq!(sim.actor, Actor::new(&sim.playfield, &sim.tuning));
    }
}
