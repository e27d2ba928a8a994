//! Common test utilities and fixtures.

use std::path::Path;
use std::sync::Arc;

use smd_core::{FileSettings, SettingsProvider, SharedSettings};
use smd_listener::SamlListener;
use smd_store::{JsonFileBackend, MessageStore};
use tempfile::TempDir;

pub use smd_integration_tests::*;

/// A listener over a file-backed store in a fresh data directory.
pub struct TestEnv {
    /// Data directory, removed on drop.
    pub dir: TempDir,
    /// Settings file in the data directory.
    pub settings: Arc<FileSettings>,
    /// Store shared with the listener.
    pub store: Arc<MessageStore>,
    /// Listener feeding the store.
    pub listener: SamlListener,
}

impl TestEnv {
    /// Creates a new test environment.
    pub fn new() -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("smd_listener=debug,smd_store=debug")
            .with_test_writer()
            .try_init();

        let dir = tempfile::tempdir()?;
        let settings = Arc::new(FileSettings::in_dir(dir.path()));
        let store = Arc::new(open_store(dir.path(), settings.clone()));
        let listener = SamlListener::new(store.clone());

        Ok(Self {
            dir,
            settings,
            store,
            listener,
        })
    }

    /// Opens a second store over the same data directory.
    pub fn reopen(&self) -> MessageStore {
        open_store(self.dir.path(), self.settings.clone())
    }
}

/// A store over in-process settings with the given capacity.
pub fn memory_store(capacity: usize) -> anyhow::Result<(Arc<SharedSettings>, MessageStore)> {
    let settings = Arc::new(SharedSettings::default());
    settings.set_max_stored_messages(capacity)?;
    let store = MessageStore::in_memory(settings.clone());
    Ok((settings, store))
}

fn open_store(dir: &Path, settings: Arc<dyn SettingsProvider>) -> MessageStore {
    MessageStore::open(JsonFileBackend::in_dir(dir), settings)
}
