//! Tick scheduling
//!
//! Browser frames arrive at whatever rate the display refreshes, so
//! [`FixedStep`] turns frame deltas into whole ticks. Native drivers run an
//! explicit loop paced by [`FrameLimiter`].

use crate::consts::MAX_SUBSTEPS;

/// Longest frame delta accepted (seconds); longer gaps are treated as a stall
const MAX_FRAME_DELTA: f32 = 0.1;

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            step: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed a frame delta (seconds) and get the number of ticks to run.
    /// Never more than `MAX_SUBSTEPS`, to prevent a spiral of death.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DELTA);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    /// Drop any partial tick (after a pause or tab switch)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Paces an explicit loop to a fixed frame rate
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame: std::time::Duration,
    next: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameLimiter {
    pub fn new(frame_rate: u32) -> Self {
        let frame = std::time::Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64);
        Self {
            frame,
            next: std::time::Instant::now() + frame,
        }
    }

    pub fn frame(&self) -> std::time::Duration {
        self.frame
    }

    /// Sleep until the next frame is due. If the loop has fallen more than a
    /// frame behind, the schedule restarts from now instead of bursting.
    pub fn wait(&mut self) {
        let now = std::time::Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
            self.next += self.frame;
        } else if now - self.next > self.frame {
            self.next = now + self.frame;
        } else {
            self.next += self.frame;
        }
    }
}
