//! Activation input
//!
//! The game has a single control. Event handlers record activations in an
//! [`InputQueue`] and the driver applies them before the next tick, so input
//! never lands in the middle of one.

use crate::sim::{Simulation, autopilot, handle_input};

/// Upper bound on queued activations between two frames
pub const MAX_PENDING: u32 = 8;

/// One activation per physical press of the bound key.
///
/// Keyboards auto-repeat while a key is held; only the first press after a
/// release counts.
#[derive(Debug, Clone, Default)]
pub struct ActivateLatch {
    held: bool,
}

impl ActivateLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Returns true if this is a fresh press.
    pub fn press(&mut self) -> bool {
        if self.held {
            false
        } else {
            self.held = true;
            true
        }
    }

    /// Key came up
    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Activations waiting for the next frame
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: u32,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one activation. Excess presses within a single frame are
    /// dropped.
    pub fn push(&mut self) {
        if self.pending < MAX_PENDING {
            self.pending += 1;
        } else {
            log::debug!("Input queue full, dropping activation");
        }
    }

    pub fn len(&self) -> u32 {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Apply every queued activation to the simulation, in arrival order
    pub fn apply(&mut self, sim: &mut Simulation) -> u32 {
        let count = std::mem::take(&mut self.pending);
        for _ in 0..count {
            handle_input(sim);
        }
        count
    }
}

/// Queue this frame's autopilot activation, if it wants one.
///
/// The autopilot has no key to hold, so each frame it asks counts as a
/// fresh press and never goes through an [`ActivateLatch`].
pub fn queue_autopilot(sim: &Simulation, input: &mut InputQueue) -> bool {
    let wants = autopilot::wants_impulse(sim);
    if wants {
        input.push();
    }
    wants
}
