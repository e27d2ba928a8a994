//! Decoder settings.
//!
//! Settings are process-wide state: the capture path reads the message
//! capacity on every append while the settings controller writes user
//! preferences independently. Both providers below hand out whole
//! [`Settings`] values, so a reader never observes a half-written update.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of messages kept when nothing else is configured.
pub const DEFAULT_MAX_STORED_MESSAGES: usize = 10;

/// The larger capacity preset offered by the settings controller.
pub const EXTENDED_MAX_STORED_MESSAGES: usize = 100;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SMD_HOME";

/// File name of the persisted settings inside the data directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Direction in which the message viewer pages through stored messages.
///
/// Only consumed by presentation code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollingDirection {
    /// Scroll horizontally (default).
    #[default]
    Horizontally,
    /// Scroll vertically.
    Vertically,
}

impl ScrollingDirection {
    /// Returns the persisted name of this direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontally => "horizontally",
            Self::Vertically => "vertically",
        }
    }
}

impl std::fmt::Display for ScrollingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Maximum number of messages retained in the history.
    #[serde(default = "default_max_stored_messages")]
    pub max_number_of_stored_messages: usize,

    /// Viewer scrolling direction.
    #[serde(default)]
    pub scrolling_direction: ScrollingDirection,
}

const fn default_max_stored_messages() -> usize {
    DEFAULT_MAX_STORED_MESSAGES
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_number_of_stored_messages: DEFAULT_MAX_STORED_MESSAGES,
            scrolling_direction: ScrollingDirection::default(),
        }
    }
}

impl Settings {
    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_number_of_stored_messages == 0 {
            return Err(Error::Config(
                "maxNumberOfStoredMessages must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Renders settings as TOML text.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Source of settings for the capture path.
///
/// Implementations are read on every append, so a change made through the
/// settings controller applies to the next stored message.
pub trait SettingsProvider: Send + Sync {
    /// Returns the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationUnavailable`] if persisted settings
    /// cannot be read right now.
    fn settings(&self) -> Result<Settings>;

    /// Returns the current message capacity.
    ///
    /// A persisted capacity of zero is reported as unavailable rather than
    /// handed to the store.
    fn max_stored_messages(&self) -> Result<usize> {
        let settings = self.settings()?;
        settings
            .validate()
            .map_err(|e| Error::ConfigurationUnavailable(e.to_string()))?;
        Ok(settings.max_number_of_stored_messages)
    }
}

/// In-process settings shared between readers and the settings controller.
#[derive(Debug, Default)]
pub struct SharedSettings {
    inner: RwLock<Settings>,
}

impl SharedSettings {
    /// Creates shared settings with the given initial values.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    /// Returns a snapshot of the current settings.
    #[must_use]
    pub fn get(&self) -> Settings {
        self.inner.read().clone()
    }

    /// Replaces all settings at once.
    pub fn replace(&self, settings: Settings) -> Result<()> {
        settings.validate()?;
        *self.inner.write() = settings;
        Ok(())
    }

    /// Sets the message capacity.
    pub fn set_max_stored_messages(&self, max: usize) -> Result<()> {
        let mut next = self.get();
        next.max_number_of_stored_messages = max;
        self.replace(next)
    }

    /// Sets the viewer scrolling direction.
    pub fn set_scrolling_direction(&self, direction: ScrollingDirection) {
        self.inner.write().scrolling_direction = direction;
    }
}

impl SettingsProvider for SharedSettings {
    fn settings(&self) -> Result<Settings> {
        Ok(self.get())
    }
}

/// Settings persisted as a TOML file.
///
/// The file is re-read on every access so that a write from another process
/// is picked up by the next append. A missing file means defaults.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    /// Creates a provider backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a provider for `settings.toml` inside the data directory.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SETTINGS_FILE_NAME))
    }

    /// Returns the settings file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings from disk.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::ConfigurationUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        Settings::from_toml(&content).map_err(|e| {
            Error::ConfigurationUnavailable(format!("{}: {e}", self.path.display()))
        })
    }

    /// Writes settings to disk.
    ///
    /// The file is written next to its final location and renamed into
    /// place, so concurrent readers see either the old or the new settings.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        settings.validate()?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = settings.to_toml()?;
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Loads, modifies, and saves settings.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Result<Settings> {
        let mut settings = self.load()?;
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

impl SettingsProvider for FileSettings {
    fn settings(&self) -> Result<Settings> {
        self.load()
    }
}

/// Resolves the directory holding settings and stored messages.
///
/// An explicit path wins, then `SMD_HOME`, then `~/.saml-decoder`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }

    let home = dirs_next::home_dir()
        .ok_or_else(|| Error::Config("could not determine home directory".to_string()))?;
    Ok(home.join(".saml-decoder"))
}
