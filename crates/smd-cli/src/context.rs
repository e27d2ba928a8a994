//! Shared state for command execution.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use smd_core::config::resolve_data_dir;
use smd_core::FileSettings;
use smd_store::{JsonFileBackend, MessageStore};

/// Settings and message history opened from one data directory.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Directory holding settings and stored messages.
    pub data_dir: PathBuf,
    /// Persisted settings, re-read on every access.
    pub settings: Arc<FileSettings>,
    /// Persisted message history.
    pub store: Arc<MessageStore>,
}

impl AppContext {
    /// Opens the data directory, resolving it from `home`, `SMD_HOME` or the
    /// user's home directory.
    pub fn open(home: Option<&Path>) -> crate::CliResult<Self> {
        let data_dir = resolve_data_dir(home)?;
        Ok(Self::in_dir(data_dir))
    }

    /// Opens an explicit data directory.
    #[must_use]
    pub fn in_dir(data_dir: PathBuf) -> Self {
        let settings = Arc::new(FileSettings::in_dir(&data_dir));
        let store = Arc::new(MessageStore::open(
            JsonFileBackend::in_dir(&data_dir),
            settings.clone(),
        ));

        tracing::debug!(data_dir = %data_dir.display(), messages = store.len(), "data directory opened");

        Self {
            data_dir,
            settings,
            store,
        }
    }
}
