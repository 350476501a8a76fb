//! Character-grid renderer for terminals and logs

use glam::Vec2;

use super::{Renderer, hud_lines, overlay_lines};
use crate::sim::Simulation;

const ACTOR: char = '@';
const BARRIER: char = '#';
const SKY: char = ' ';

/// Renders the playfield into a fixed-size grid of characters
#[derive(Debug, Clone)]
pub struct TextRenderer {
    cols: usize,
    rows: usize,
    frame: String,
}

impl TextRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            frame: String::new(),
        }
    }

    /// Most recently rendered frame, rows separated by newlines
    pub fn frame(&self) -> &str {
        &self.frame
    }

    fn rasterize(&self, sim: &Simulation) -> Vec<Vec<char>> {
        let cell = Vec2::new(
            sim.playfield.width / self.cols as f32,
            sim.playfield.height / self.rows as f32,
        );
        let actor = &sim.actor;
        let barriers: Vec<_> = sim
            .obstacles
            .iter()
            .flat_map(|o| [o.top_barrier(), o.bottom_barrier()])
            .collect();

        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| {
                        let p = Vec2::new((col as f32 + 0.5) * cell.x, (row as f32 + 0.5) * cell.y);
                        if p.distance(actor.pos) <= actor.size {
                            ACTOR
                        } else if barriers
                            .iter()
                            .any(|b| p.x >= b.min.x && p.x < b.max.x && p.y >= b.min.y && p.y < b.max.y)
                        {
                            BARRIER
                        } else {
                            SKY
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Write `text` centered on `row`, clipped to the grid
    fn stamp(&self, grid: &mut [Vec<char>], row: usize, text: &str) {
        let Some(line) = grid.get_mut(row) else {
            return;
        };
        let len = text.chars().count().min(self.cols);
        let start = (self.cols - len) / 2;
        for (i, ch) in text.chars().take(len).enumerate() {
            line[start + i] = ch;
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, sim: &Simulation) {
        let mut grid = self.rasterize(sim);

        if let Some(hud) = hud_lines(sim) {
            for (row, line) in hud.iter().enumerate() {
                self.stamp(&mut grid, row, line);
            }
        }

        if let Some(lines) = overlay_lines(sim) {
            let top = (self.rows / 2).saturating_sub(lines.len() / 2);
            for (i, line) in lines.iter().enumerate() {
                self.stamp(&mut grid, top + i, line);
            }
        }

        self.frame.clear();
        for (i, line) in grid.iter().enumerate() {
            if i > 0 {
                self.frame.push('\n');
            }
            self.frame.extend(line.iter());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::settings::Settings;
    use crate::sim::{GamePhase, Obstacle, handle_input};

    fn sim() -> Simulation {
        Simulation::new(&Settings::default(), Box::new(MemoryStore::with_value(4)), 7)
    }

    fn rows(frame: &str) -> Vec<&str> {
        frame.lines().collect()
    }

    #[test]
    fn test_start_overlay() {
        let sim = sim();
        let mut renderer = TextRenderer::new(48, 32);
        renderer.render(&sim);
        let frame = renderer.frame();
        assert_eq!(rows(frame).len(), 32);
        assert!(frame.contains("Flappy"));
        assert!(frame.contains("Press Space or Tap to Start"));
        assert!(!frame.contains("Score:"));
    }

    #[test]
    fn test_running_frame_shows_actor_and_barriers() {
        let mut sim = sim();
        handle_input(&mut sim);
        let (pf, tuning) = (sim.playfield, sim.tuning);
        let id = sim.next_obstacle_id();
        sim.obstacles.push(Obstacle::new(id, 240.0, 200.0, &pf, &tuning));

        let mut renderer = TextRenderer::new(48, 32);
        renderer.render(&sim);
        let frame = renderer.frame();
        let lines = rows(frame);

        assert!(lines[0].contains("Score: 0"));
        assert!(lines[1].contains("High Score: 4"));
        // 10x20 cells: actor at (96, 320) covers column 9, row 16
        assert_eq!(lines[16].chars().nth(9), Some(ACTOR));
        // Obstacle spans columns 24..32, gap rows 10..20
        assert_eq!(lines[5].chars().nth(26), Some(BARRIER));
        assert_eq!(lines[15].chars().nth(26), Some(SKY));
        assert_eq!(lines[25].chars().nth(26), Some(BARRIER));
        assert_eq!(lines[15].chars().nth(40), Some(SKY));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut sim = sim();
        handle_input(&mut sim);
        sim.score = 2;
        sim.phase = GamePhase::Over;
        let mut renderer = TextRenderer::new(48, 32);
        renderer.render(&sim);
        assert!(renderer.frame().contains("Game Over!"));
        assert!(renderer.frame().contains("Final Score: 2"));
    }

    #[test]
    fn test_long_text_is_clipped() {
        let sim = sim();
        let mut renderer = TextRenderer::new(10, 5);
        renderer.render(&sim);
        assert!(rows(renderer.frame()).iter().all(|l| l.chars().count() == 10));
    }
}
