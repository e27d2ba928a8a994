//! The bounded message history.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use parking_lot::Mutex;
use smd_core::{DecodedMessage, SettingsProvider, DEFAULT_MAX_STORED_MESSAGES};

use crate::backend::{InMemoryBackend, MessageBackend};
use crate::error::StoreResult;

/// Ordered history of decoded messages with oldest-first eviction.
///
/// The capacity is read from the settings provider on every append, so a
/// capacity change takes effect with the next append. All mutations happen
/// under one lock and are persisted as a whole list; no reader ever sees
/// more messages than the capacity in force at the last append.
pub struct MessageStore {
    messages: Mutex<VecDeque<DecodedMessage>>,
    backend: Box<dyn MessageBackend>,
    settings: Arc<dyn SettingsProvider>,
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl MessageStore {
    /// Creates an empty, non-persistent store.
    #[must_use]
    pub fn in_memory(settings: Arc<dyn SettingsProvider>) -> Self {
        Self::open(InMemoryBackend::new(), settings)
    }

    /// Opens a store over a persistence backend.
    ///
    /// An unreadable history is logged and replaced by an empty one.
    #[must_use]
    pub fn open(backend: impl MessageBackend + 'static, settings: Arc<dyn SettingsProvider>) -> Self {
        let messages = backend.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored messages unreadable, starting with an empty history");
            Vec::new()
        });

        Self {
            messages: Mutex::new(messages.into()),
            backend: Box::new(backend),
            settings,
        }
    }

    /// Returns the capacity currently configured.
    ///
    /// Falls back to the default capacity when settings are unavailable.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.settings.max_stored_messages().unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                fallback = DEFAULT_MAX_STORED_MESSAGES,
                "settings unavailable, using default capacity"
            );
            DEFAULT_MAX_STORED_MESSAGES
        })
    }

    /// Appends a message, evicting the oldest ones beyond capacity.
    ///
    /// The store assigns the capture time while holding its lock, so the
    /// history is in capture order; the time on `message` is not kept.
    /// The stored record reads back unchanged after a reload.
    /// Returns the record as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the history could not be persisted. The
    /// in-memory history is then left as it was before the call.
    pub fn append(&self, mut message: DecodedMessage) -> StoreResult<DecodedMessage> {
        let capacity = self.capacity();
        let mut messages = self.messages.lock();

        // Whole seconds, matching what the history file keeps.
        message.time = Utc::now().trunc_subsecs(0);
        messages.push_back(message.clone());

        let excess = messages.len().saturating_sub(capacity);
        let evicted: Vec<_> = messages.drain(..excess).collect();

        if let Err(e) = self.backend.save(messages.make_contiguous()) {
            messages.pop_back();
            for old in evicted.into_iter().rev() {
                messages.push_front(old);
            }
            return Err(e);
        }

        if excess > 0 {
            tracing::debug!(evicted = excess, capacity, "trimmed message history");
        }
        Ok(message)
    }

    /// Removes all messages.
    pub fn clear(&self) -> StoreResult<()> {
        let mut messages = self.messages.lock();
        messages.clear();
        self.backend.save(&[])
    }

    /// Returns all messages, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<DecodedMessage> {
        self.messages.lock().iter().cloned().collect()
    }

    /// Returns the message at a zero-based position, oldest first.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<DecodedMessage> {
        self.messages.lock().get(index).cloned()
    }

    /// Returns the number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Returns whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Serializes the whole history as pretty-printed JSON.
    pub fn export_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }
}
