//! Captured HTTP transactions.
//!
//! These are the records handed over by the traffic interceptor. The JSON
//! shape follows the browser `webRequest` details object: `method`, `url`
//! and an optional `requestBody` holding either `formData` or `raw`
//! fragments. Raw fragment bytes travel as standard base64 text.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{SamlError, SamlResult};

/// Pre-parsed form fields: name to every submitted value, in order.
pub type FormData = IndexMap<String, Vec<String>>;

/// A single HTTP transaction as seen by the interceptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedRequest {
    /// HTTP method.
    pub method: String,
    /// Full request URL including the query string.
    pub url: String,
    /// Request body, when the interceptor could observe one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
}

/// Request body in one of the shapes the interceptor delivers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Form fields already parsed by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<FormData>,
    /// Raw body fragments, in arrival order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<RawChunk>>,
}

/// One fragment of a raw request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawChunk {
    /// Fragment bytes.
    #[serde(default, with = "base64_bytes", skip_serializing_if = "Option::is_none")]
    pub bytes: Option<Vec<u8>>,
    /// Path of an uploaded file, when the fragment is a file reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl RawChunk {
    /// Creates a fragment holding bytes.
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
            file: None,
        }
    }
}

impl CapturedRequest {
    /// Creates a GET transaction.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            request_body: None,
        }
    }

    /// Creates a POST transaction with pre-parsed form fields.
    #[must_use]
    pub fn post_form(url: impl Into<String>, form_data: FormData) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            request_body: Some(RequestBody {
                form_data: Some(form_data),
                raw: None,
            }),
        }
    }

    /// Creates a POST transaction with raw body fragments.
    #[must_use]
    pub fn post_raw<I, B>(url: impl Into<String>, fragments: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            request_body: Some(RequestBody {
                form_data: None,
                raw: Some(fragments.into_iter().map(RawChunk::bytes).collect()),
            }),
        }
    }

    /// Parses a transaction from its JSON form.
    pub fn from_json(json: &str) -> SamlResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SamlError::InvalidRequest(format!("malformed capture record: {e}")))
    }

    /// Returns whether this is a GET request.
    #[must_use]
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    /// Returns whether this is a POST request.
    #[must_use]
    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("POST")
    }
}

mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(b)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                base64::engine::general_purpose::STANDARD
                    .decode(s)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
