//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be read or written.
    #[error("configuration error: {0}")]
    Config(#[from] smd_core::Error),

    /// The message history could not be read or written.
    #[error("{0}")]
    Store(#[from] smd_store::StoreError),

    /// A recognized SAML message failed to decode.
    #[error("decode error: {0}")]
    Decode(#[from] smd_protocol_saml::SamlError),

    /// The input does not carry a SAML message.
    #[error("no SAML message found: {0}")]
    NotRecognized(String),

    /// No stored message at the given position.
    #[error("message not found: {0}")]
    NotFound(usize),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
