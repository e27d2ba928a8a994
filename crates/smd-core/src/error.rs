//! Error handling for the SAML message decoder core.

use thiserror::Error;

/// Result type alias using the core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading or writing settings.
#[derive(Debug, Error)]
pub enum Error {
    /// Persisted settings exist but could not be read at the time they were needed.
    ///
    /// Callers on the capture path recover from this by falling back to the
    /// documented defaults.
    #[error("configuration unavailable: {0}")]
    ConfigurationUnavailable(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
