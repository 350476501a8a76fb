//! Game settings and tuning
//!
//! Native builds read a JSON file, the web build reads LocalStorage.
//! Missing fields fall back to defaults and invalid values are repaired by
//! [`Settings::sanitize`], so a bad config never stops the game.

use serde::{Deserialize, Serialize};

use crate::Playfield;
use crate::consts::*;

/// Tunable physics and obstacle constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub lift: f32,
    pub upward_boost: f32,
    pub terminal_velocity: f32,
    pub drag: f32,
    pub actor_size: f32,
    pub obstacle_width: f32,
    pub gap: f32,
    pub obstacle_speed: f32,
    pub spawn_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            lift: LIFT,
            upward_boost: UPWARD_BOOST,
            terminal_velocity: TERMINAL_VELOCITY,
            drag: DRAG,
            actor_size: ACTOR_SIZE,
            obstacle_width: OBSTACLE_WIDTH,
            gap: OBSTACLE_GAP,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield dimensions
    pub playfield: Playfield,
    /// Physics and obstacle constants
    pub tuning: Tuning,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// High score file (native only)
    pub high_score_file: String,
    /// Frames the native headless demo runs for
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            tuning: Tuning::default(),
            seed: None,
            tick_rate: TICK_RATE,
            high_score_file: "flappy-high-score.json".to_string(),
            demo_frames: 3600,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file (native only)
    pub const PATH_ENV: &'static str = "FLAPPY_SETTINGS";
    /// Settings file used when the environment variable is unset
    pub const DEFAULT_PATH: &'static str = "flappy-settings.json";
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_settings";

    /// Parse settings from JSON, repairing invalid values
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.sanitize();
                Some(settings)
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    /// Replace values that would break simulation invariants with defaults.
    ///
    /// Returns true if anything was changed.
    pub fn sanitize(&mut self) -> bool {
        let defaults = Settings::default();
        let mut changed = false;

        let pf = self.playfield;
        if !(pf.width > 0.0 && pf.width.is_finite() && pf.height > 0.0 && pf.height.is_finite()) {
            log::warn!("Playfield {}x{} is invalid, using default", pf.width, pf.height);
            self.playfield = defaults.playfield;
            changed = true;
        }

        // The actor must fit between floor and ceiling with room to move
        let fits = |size: f32, height: f32| size > 0.0 && 4.0 * size <= height;
        if !fits(self.tuning.actor_size, self.playfield.height) {
            log::warn!(
                "actor_size {} does not fit a {} high playfield, using {}",
                self.tuning.actor_size,
                self.playfield.height,
                defaults.tuning.actor_size
            );
            self.tuning.actor_size = defaults.tuning.actor_size;
            if !fits(self.tuning.actor_size, self.playfield.height) {
                self.playfield = defaults.playfield;
            }
            changed = true;
        }

        let t = &mut self.tuning;
        let dt = defaults.tuning;
        if !(t.obstacle_width > 0.0 && t.obstacle_width.is_finite()) {
            log::warn!("obstacle_width must be positive, using {}", dt.obstacle_width);
            t.obstacle_width = dt.obstacle_width;
            changed = true;
        }
        if !(t.obstacle_speed > 0.0 && t.obstacle_speed.is_finite()) {
            log::warn!("obstacle_speed must be positive, using {}", dt.obstacle_speed);
            t.obstacle_speed = dt.obstacle_speed;
            changed = true;
        }
        if !(t.gap > 0.0 && t.gap.is_finite()) {
            log::warn!("gap must be positive, using {}", dt.gap);
            t.gap = dt.gap;
            changed = true;
        }
        if !(t.gravity > 0.0 && t.gravity.is_finite()) {
            log::warn!("gravity must be positive, using {}", dt.gravity);
            t.gravity = dt.gravity;
            changed = true;
        }
        if !(t.terminal_velocity > 0.0 && t.terminal_velocity.is_finite()) {
            log::warn!("terminal_velocity must be positive, using {}", dt.terminal_velocity);
            t.terminal_velocity = dt.terminal_velocity;
            changed = true;
        }
        if !(t.drag > 0.0 && t.drag <= 1.0) {
            log::warn!("drag must be in (0, 1], using {}", dt.drag);
            t.drag = dt.drag;
            changed = true;
        }
        if !(t.lift < 0.0 && t.lift.is_finite()) {
            log::warn!("lift must be negative (upward), using {}", dt.lift);
            t.lift = dt.lift;
            changed = true;
        }
        // A rising flap must always beat a falling one
        if !(t.upward_boost > 1.0 && t.upward_boost.is_finite()) {
            log::warn!("upward_boost must exceed 1, using {}", dt.upward_boost);
            t.upward_boost = dt.upward_boost;
            changed = true;
        }
        if t.spawn_interval == 0 {
            log::warn!("spawn_interval must be non-zero, using {}", dt.spawn_interval);
            t.spawn_interval = dt.spawn_interval;
            changed = true;
        }
        if self.tick_rate == 0 {
            log::warn!("tick_rate must be non-zero, using {}", defaults.tick_rate);
            self.tick_rate = defaults.tick_rate;
            changed = true;
        }

        // Gap placement needs a non-empty range for gap_top
        if self.gap_top_range().is_empty() {
            log::warn!(
                "gap {} leaves no room in a {} high playfield, restoring defaults",
                self.tuning.gap,
                self.playfield.height
            );
            self.tuning.gap = dt.gap;
            if self.gap_top_range().is_empty() {
                self.playfield = defaults.playfield;
            }
            changed = true;
        }

        changed
    }

    /// Valid range for an obstacle's gap top edge
    pub fn gap_top_range(&self) -> std::ops::Range<f32> {
        gap_top_range(&self.playfield, self.tuning.gap)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from `$FLAPPY_SETTINGS` or `flappy-settings.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        Self::load_from(std::path::Path::new(&path))
    }

    /// Load settings from a specific file, defaulting when absent or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Some(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                None => Self::default(),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Valid range for an obstacle's gap top edge in a playfield
pub fn gap_top_range(playfield: &Playfield, gap: f32) -> std::ops::Range<f32> {
    GAP_TOP_MIN..(playfield.height - gap - GAP_BOTTOM_MARGIN)
}
