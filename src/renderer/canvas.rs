//! Canvas 2D renderer (WASM only)

use std::f64::consts::{FRAC_PI_4, TAU};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Renderer, hud_lines, overlay_lines};
use crate::sim::{Actor, Obstacle, Simulation};

const SKY_TOP: &str = "#87CEEB";
const SKY_BOTTOM: &str = "#4CA1AF";
const PIPE: &str = "#2ecc71";
const PIPE_LIP: &str = "#27ae60";
const LIP_HEIGHT: f64 = 30.0;
const LIP_OVERHANG: f64 = 10.0;
const OVERLAY: &str = "rgba(0, 0, 0, 0.5)";

/// Draws the game onto an HTML canvas, one canvas pixel per playfield unit
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn draw_background(&self) -> Result<(), JsValue> {
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        gradient.add_color_stop(0.0, SKY_TOP)?;
        gradient.add_color_stop(1.0, SKY_BOTTOM)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        Ok(())
    }

    fn draw_obstacle(&self, obstacle: &Obstacle) {
        let top = obstacle.top_barrier();
        let bottom = obstacle.bottom_barrier();
        let x = top.min.x as f64;
        let w = top.width() as f64;

        self.ctx.set_fill_style_str(PIPE);
        self.ctx.fill_rect(x, 0.0, w, top.height() as f64);
        self.ctx
            .fill_rect(x, bottom.min.y as f64, w, bottom.height() as f64);

        // Lips face the gap
        self.ctx.set_fill_style_str(PIPE_LIP);
        self.ctx.fill_rect(
            x - LIP_OVERHANG,
            top.max.y as f64 - LIP_HEIGHT,
            w + LIP_OVERHANG * 2.0,
            LIP_HEIGHT,
        );
        self.ctx.fill_rect(
            x - LIP_OVERHANG,
            bottom.min.y as f64,
            w + LIP_OVERHANG * 2.0,
            LIP_HEIGHT,
        );
    }

    fn draw_actor(&self, actor: &Actor) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let s = actor.size as f64;

        ctx.save();
        ctx.translate(actor.pos.x as f64, actor.pos.y as f64)?;
        ctx.rotate(actor.rotation as f64)?;

        // Body
        ctx.set_fill_style_str("#FFD700");
        ctx.begin_path();
        ctx.arc(0.0, 0.0, s, 0.0, TAU)?;
        ctx.fill();

        // Wing
        ctx.set_fill_style_str("#FFA500");
        ctx.begin_path();
        ctx.ellipse(-5.0, 0.0, s * 0.5, s * 0.3, FRAC_PI_4, 0.0, TAU)?;
        ctx.fill();

        // Eye
        ctx.set_fill_style_str("white");
        ctx.begin_path();
        ctx.arc(s * 0.3, -s * 0.2, s * 0.25, 0.0, TAU)?;
        ctx.fill();
        ctx.set_fill_style_str("black");
        ctx.begin_path();
        ctx.arc(s * 0.4, -s * 0.2, s * 0.12, 0.0, TAU)?;
        ctx.fill();

        // Beak
        ctx.set_fill_style_str("#FF6B6B");
        ctx.begin_path();
        ctx.move_to(s * 0.7, 0.0);
        ctx.line_to(s * 1.2, -s * 0.1);
        ctx.line_to(s * 1.2, s * 0.1);
        ctx.close_path();
        ctx.fill();

        ctx.restore();
        Ok(())
    }

    fn draw_hud(&self, sim: &Simulation) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_text_align("center");
        ctx.set_line_width(3.0);
        ctx.set_stroke_style_str("#000");
        ctx.set_fill_style_str("#fff");

        if let Some([score, high]) = hud_lines(sim) {
            let cx = self.width / 2.0;
            ctx.set_font("bold 32px Arial");
            ctx.stroke_text(&score, cx, 50.0)?;
            ctx.fill_text(&score, cx, 50.0)?;
            ctx.set_font("bold 24px Arial");
            ctx.stroke_text(&high, cx, 90.0)?;
            ctx.fill_text(&high, cx, 90.0)?;
        }
        Ok(())
    }

    fn draw_overlay(&self, sim: &Simulation) -> Result<(), JsValue> {
        let Some(lines) = overlay_lines(sim) else {
            return Ok(());
        };
        let ctx = &self.ctx;
        ctx.set_fill_style_str(OVERLAY);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        ctx.set_fill_style_str("#fff");
        ctx.set_text_align("center");
        let cx = self.width / 2.0;
        let mut y = self.height / 2.0 - 50.0;
        for (i, line) in lines.iter().enumerate() {
            ctx.set_font(if i == 0 { "48px Arial" } else { "24px Arial" });
            ctx.fill_text(line, cx, y)?;
            y += if i == 0 { 60.0 } else { 40.0 };
        }
        Ok(())
    }

    fn draw(&mut self, sim: &Simulation) -> Result<(), JsValue> {
        self.draw_background()?;
        for obstacle in &sim.obstacles {
            self.draw_obstacle(obstacle);
        }
        self.draw_actor(&sim.actor)?;
        self.draw_hud(sim)?;
        self.draw_overlay(sim)
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, sim: &Simulation) {
        if let Err(e) = self.draw(sim) {
            log::warn!("Canvas draw failed: {:?}", e);
        }
    }
}
