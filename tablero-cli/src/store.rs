//! File-backed session store.
//!
//! The whole collection persists as one JSON document at a well-known
//! path, the driver-side equivalent of a keyed text-blob substrate.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tablero_engine::{Game, GameStore};

pub struct JsonFileStore {
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl GameStore for JsonFileStore {
    type Error = FileStoreError;

    fn load_all(&self) -> Result<Vec<Game>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        // Content that no longer decodes reads as an empty collection.
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }

    fn save_all(&mut self, games: &[Game]) -> Result<(), Self::Error> {
        let raw = serde_json::to_string_pretty(games)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
