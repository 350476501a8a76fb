//! JSON file high score store (native only)
//!
//! Saves are handed to a writer thread so a slow disk never stalls a tick.
//! The writer coalesces bursts down to the latest value and writes through a
//! temporary file followed by a rename, so a crash mid-write leaves the
//! previous record intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use super::{HighScoreRecord, HighScoreStore};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tx: Option<Sender<u32>>,
    writer: Option<JoinHandle<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        let writer_path = path.clone();
        let writer = std::thread::Builder::new()
            .name("high-score-writer".to_string())
            .spawn(move || run_writer(&writer_path, rx));

        match writer {
            Ok(handle) => Self {
                path,
                tx: Some(tx),
                writer: Some(handle),
            },
            Err(e) => {
                log::warn!("Could not start high score writer, saves disabled: {}", e);
                Self {
                    path,
                    tx: None,
                    writer: None,
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> u32 {
        match read_record(&self.path) {
            Ok(Some(record)) => {
                log::info!("Loaded high score {} from {}", record.high_score, self.path.display());
                record.high_score
            }
            Ok(None) => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                0
            }
            Err(e) => {
                log::warn!("Could not read high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, value: u32) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(value).is_err() {
            log::warn!("High score writer stopped, dropping save of {}", value);
            self.tx = None;
        }
    }
}

impl Drop for JsonFileStore {
    fn drop(&mut self) {
        // Closing the channel lets the writer flush and exit
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            let _ = writer.join();
        }
    }
}

fn read_record(path: &Path) -> io::Result<Option<HighScoreRecord>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    HighScoreRecord::parse(&text)
        .map(Some)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "unrecognized high score record"))
}

fn write_record(path: &Path, record: &HighScoreRecord) -> io::Result<()> {
    let json = serde_json::to_string_pretty(record).map_err(io::Error::other)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)
}

fn run_writer(path: &Path, rx: Receiver<u32>) {
    while let Ok(mut value) = rx.recv() {
        // Only the newest pending value matters
        while let Ok(newer) = rx.try_recv() {
            value = newer;
        }
        match write_record(path, &HighScoreRecord { high_score: value }) {
            Ok(()) => log::debug!("High score {} saved to {}", value, path.display()),
            Err(e) => log::warn!("Could not save high score to {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("scores.json"));
        assert_eq!(store.path(), dir.path().join("scores.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        {
            let mut store = JsonFileStore::new(&path);
            store.save(4);
            store.save(11);
        }
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load(), 11);
        assert!(!dir.path().join("scores.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{ definitely not a score").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_unwritable_location_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("scores.json");
        let mut store = JsonFileStore::new(&path);
        store.save(5);
        drop(store);
        assert!(!path.exists());
    }
}
