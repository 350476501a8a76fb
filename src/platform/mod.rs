//! Platform glue shared by the native and browser drivers
//!
//! - `input`: turning raw key/touch events into serialized activations
//! - `time`: fixed-rate tick scheduling

pub mod input;
pub mod time;

pub use input::{ActivateLatch, InputQueue, queue_autopilot};
pub use time::FixedStep;
#[cfg(not(target_arch = "wasm32"))]
pub use time::FrameLimiter;
