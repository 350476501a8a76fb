//! High score persistence
//!
//! The simulation only ever sees [`HighScoreStore`]. Loads default to 0 when
//! nothing was saved or the stored value is unreadable, and saves never
//! report failure back to the caller: a broken store costs the player their
//! record, not the game.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Backing store for the best score
pub trait HighScoreStore: Debug {
    /// Previously saved high score, or 0 if absent
    fn load(&mut self) -> u32;

    /// Persist a new high score. Must not block the tick loop.
    fn save(&mut self, value: u32);
}

/// On-disk/in-storage document for the high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

impl HighScoreRecord {
    /// Parse a stored record. Accepts the JSON document or a bare integer.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(record) = serde_json::from_str::<HighScoreRecord>(text) {
            return Some(record);
        }
        text.parse::<u32>().ok().map(|high_score| Self { high_score })
    }
}

/// In-process store. Clones share the same slot, so a test or driver can
/// keep a handle while the simulation owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<Option<u32>>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a saved score
    pub fn with_value(value: u32) -> Self {
        let store = Self::default();
        store.value.set(Some(value));
        store
    }

    /// Currently stored value (None if never saved)
    pub fn value(&self) -> Option<u32> {
        self.value.get()
    }

    /// Number of saves performed
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.value.get().unwrap_or(0)
    }

    fn save(&mut self, value: u32) {
        self.value.set(Some(value));
        self.saves.set(self.saves.get() + 1);
    }
}
