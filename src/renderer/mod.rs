//! Rendering module
//!
//! Renderers are pure consumers: they borrow the simulation immutably once
//! per frame and never feed anything back into it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use text::TextRenderer;

use crate::sim::{GamePhase, Simulation};

/// Draws one frame from the current simulation state
pub trait Renderer {
    fn render(&mut self, sim: &Simulation);
}

/// Title and prompt lines for the full-screen overlay, if any
pub fn overlay_lines(sim: &Simulation) -> Option<Vec<String>> {
    match sim.phase {
        GamePhase::NotStarted => Some(vec![
            "Flappy".to_string(),
            "Press Space or Tap to Start".to_string(),
        ]),
        GamePhase::Over => Some(vec![
            "Game Over!".to_string(),
            format!("Final Score: {}", sim.score),
            "Press Space or Tap to Restart".to_string(),
        ]),
        GamePhase::Running => None,
    }
}

/// Score readouts shown once a round has started
pub fn hud_lines(sim: &Simulation) -> Option<[String; 2]> {
    if sim.phase == GamePhase::NotStarted {
        return None;
    }
    Some([
        format!("Score: {}", sim.score),
        format!("High Score: {}", sim.high_score),
    ])
}
