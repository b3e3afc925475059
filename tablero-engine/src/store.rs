//! In-memory session store.

use crate::GameStore;
use crate::state::Game;

/// [`GameStore`] keeping the serialized collection as a single in-memory
/// blob, exercising the same encode/decode path a durable backend uses.
/// Useful for tests and for embedding without a persistence substrate.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw serialized content.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    /// The raw serialized content, if anything has been written.
    #[must_use]
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl GameStore for MemoryStore {
    type Error = serde_json::Error;

    fn load_all(&self) -> Result<Vec<Game>, Self::Error> {
        // Content that no longer decodes reads as an empty collection.
        Ok(self
            .blob
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default())
    }

    fn save_all(&mut self, games: &[Game]) -> Result<(), Self::Error> {
        self.blob = Some(serde_json::to_string(games)?);
        Ok(())
    }
}
