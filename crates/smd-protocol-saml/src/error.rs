//! SAML decoding error types.
//!
//! The decode-stage variants mean the transaction was recognized as
//! carrying a SAML message but one of the stages rejected it. Such a record
//! is dropped on its own without affecting later traffic.

use thiserror::Error;

/// Result type for SAML operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// SAML decoding errors.
#[derive(Debug, Error)]
pub enum SamlError {
    /// The captured transaction could not be interpreted at all.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The POST body could not be reconstructed into form fields.
    #[error("body reconstruction failed: {0}")]
    BodyReconstruction(String),

    /// Base64 decoding error.
    #[error("base64 decode error: {0}")]
    Base64Decode(String),

    /// Raw DEFLATE compression or decompression error.
    #[error("deflate error: {0}")]
    Deflate(String),

    /// The decoded bytes are not valid UTF-8.
    #[error("invalid UTF-8 in message: {0}")]
    Utf8(String),

    /// The decoded text contains a malformed percent escape.
    #[error("percent-decode error: {0}")]
    PercentDecode(String),
}

impl SamlError {
    /// Returns the name of the stage that failed, for diagnostics.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "request",
            Self::BodyReconstruction(_) => "body",
            Self::Base64Decode(_) => "base64",
            Self::Deflate(_) => "inflate",
            Self::Utf8(_) => "utf8",
            Self::PercentDecode(_) => "percent-decode",
        }
    }
}

impl From<base64::DecodeError> for SamlError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64Decode(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for SamlError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Utf8(err.to_string())
    }
}
