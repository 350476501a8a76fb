//! LocalStorage high score store (WASM only)
//!
//! Stores the score as plain integer text under `highScore`, the key earlier
//! browser builds of the game wrote to, so existing records keep loading.

use super::{HighScoreRecord, HighScoreStore};

#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "highScore";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score starts at 0");
            return 0;
        };

        match storage.get_item(&self.key) {
            Ok(Some(text)) => match HighScoreRecord::parse(&text) {
                Some(record) => {
                    log::info!("Loaded high score {}", record.high_score);
                    record.high_score
                }
                None => {
                    log::warn!("Ignoring unreadable high score {:?}", text);
                    0
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(_) => {
                log::warn!("LocalStorage read failed, high score starts at 0");
                0
            }
        }
    }

    fn save(&mut self, value: u32) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(&self.key, &value.to_string()).is_err() {
                log::warn!("LocalStorage write failed, dropping high score {}", value);
            }
        }
    }
}
