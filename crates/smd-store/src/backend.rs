//! Persistence backends for the message history.
//!
//! A backend always receives the complete list; it never sees individual
//! appends or evictions.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use smd_core::DecodedMessage;

use crate::error::StoreResult;

/// File name of the persisted history inside the data directory.
pub const MESSAGES_FILE_NAME: &str = "messages.json";

/// Storage for the message history.
pub trait MessageBackend: Send + Sync {
    /// Loads the persisted history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if persisted messages exist but cannot be read.
    fn load(&self) -> StoreResult<Vec<DecodedMessage>>;

    /// Replaces the persisted history.
    ///
    /// # Errors
    ///
    /// Returns an error if the history could not be written.
    fn save(&self, messages: &[DecodedMessage]) -> StoreResult<()>;
}

/// In-memory backend for testing and for hosts without persistence.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    messages: RwLock<Vec<DecodedMessage>>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

}

impl MessageBackend for InMemoryBackend {
    fn load(&self) -> StoreResult<Vec<DecodedMessage>> {
        Ok(self.messages.read().clone())
    }

    fn save(&self, messages: &[DecodedMessage]) -> StoreResult<()> {
        *self.messages.write() = messages.to_vec();
        Ok(())
    }
}

/// Backend that keeps the history as a pretty-printed JSON array.
///
/// The JSON array is the export format, so the file can be handed to the
/// message viewer directly.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend writing to the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a backend for `messages.json` inside the data directory.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(MESSAGES_FILE_NAME))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MessageBackend for JsonFileBackend {
    fn load(&self) -> StoreResult<Vec<DecodedMessage>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, messages: &[DecodedMessage]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Readers see either the old or the new list, never a partial one.
        let content = serde_json::to_string_pretty(messages)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
