//! Decoded SAML message records.
//!
//! A [`DecodedMessage`] is created once per recognized HTTP transaction and
//! never modified afterwards. Its JSON form is the export format read by
//! the message viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the parameter that carried a SAML message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamlParameter {
    /// A SAML request (`AuthnRequest`, `LogoutRequest`, ...).
    #[serde(rename = "SAMLRequest")]
    SamlRequest,
    /// A SAML response.
    #[serde(rename = "SAMLResponse")]
    SamlResponse,
    /// An eID signing request.
    #[serde(rename = "EidSignRequest")]
    EidSignRequest,
    /// An eID signing response.
    #[serde(rename = "EidSignResponse")]
    EidSignResponse,
}

impl SamlParameter {
    /// Parameters inspected on the HTTP-Redirect binding, highest priority first.
    pub const REDIRECT: [Self; 2] = [Self::SamlRequest, Self::SamlResponse];

    /// Parameters inspected on the HTTP-POST binding, highest priority first.
    pub const POST: [Self; 4] = [
        Self::SamlRequest,
        Self::SamlResponse,
        Self::EidSignRequest,
        Self::EidSignResponse,
    ];

    /// Returns the query or form parameter name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SamlRequest => "SAMLRequest",
            Self::SamlResponse => "SAMLResponse",
            Self::EidSignRequest => "EidSignRequest",
            Self::EidSignResponse => "EidSignResponse",
        }
    }
}

impl std::fmt::Display for SamlParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SAML binding the message was transported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    /// HTTP-Redirect binding (GET query string).
    Redirect,
    /// HTTP-POST binding (form body).
    Post,
}

impl Binding {
    /// Returns the persisted binding name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Redirect => "redirect",
            Self::Post => "post",
        }
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A query or form parameter exactly as it was transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter value, not base64- or deflate-decoded.
    pub value: String,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A decoded SAML message with its capture metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedMessage {
    /// Capture time, serialized as an RFC 1123 UTC string.
    #[serde(with = "http_date")]
    pub time: DateTime<Utc>,

    /// Parameter that carried the message.
    pub parameter: SamlParameter,

    /// Binding the message arrived on.
    pub binding: Binding,

    /// Decoded message text (normally XML).
    pub content: String,

    /// All parameters of the transaction, in transmission order.
    pub parameters: Vec<Parameter>,
}

impl DecodedMessage {
    /// Creates a message captured now.
    #[must_use]
    pub fn new(
        parameter: SamlParameter,
        binding: Binding,
        content: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self::captured_at(Utc::now(), parameter, binding, content, parameters)
    }

    /// Creates a message with an explicit capture time.
    #[must_use]
    pub fn captured_at(
        time: DateTime<Utc>,
        parameter: SamlParameter,
        binding: Binding,
        content: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            time,
            parameter,
            binding,
            content: content.into(),
            parameters,
        }
    }

    /// Returns the value of the first parameter with the given name.
    #[must_use]
    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// Serde adapter for `Sun, 18 Oct 2026 09:30:00 GMT` timestamps.
///
/// Whole seconds only; sub-second precision is dropped on export.
pub mod http_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

    /// Formats a timestamp.
    #[must_use]
    pub fn format(time: &DateTime<Utc>) -> String {
        time.format(FORMAT).to_string()
    }

    /// Serializes a timestamp.
    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    /// Deserializes a timestamp, also accepting RFC 3339.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc2822(&raw)
            .or_else(|_| DateTime::parse_from_rfc3339(&raw))
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
