//! HTTP-POST Binding decoding.
//!
//! The message travels base64-encoded in a form field. Most senders post
//! plain XML, some deflate it first; a [`CompressionSniffer`] decides which
//! after the base64 stage.

use smd_core::{Binding, SamlParameter};

use crate::body;
use crate::capture::RequestBody;
use crate::codec;
use crate::error::SamlResult;
use crate::sniff::CompressionSniffer;

use super::{recognize, Classification, MissReason};

/// HTTP-POST binding classifier/decoder.
pub struct HttpPostBinding;

impl HttpPostBinding {
    /// Classifies a POST request body.
    ///
    /// Inspects `SAMLRequest`, `SAMLResponse`, `EidSignRequest` and
    /// `EidSignResponse`, in that order.
    #[must_use]
    pub fn classify(body: Option<&RequestBody>) -> Classification {
        let Some(body) = body else {
            return Classification::NotRecognized(MissReason::NoBody);
        };

        let fields = match body::reconstruct(body) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::trace!(error = %e, "POST body not reconstructable");
                return Classification::NotRecognized(MissReason::UnreadableBody);
            }
        };

        recognize(fields, &SamlParameter::POST, Binding::Post)
    }

    /// Decodes a form field value into message text.
    pub fn decode(raw_value: &str, sniffer: &dyn CompressionSniffer) -> SamlResult<String> {
        let decoded = codec::base64_decode(raw_value)?;

        if sniffer.is_uncompressed(&decoded) {
            return Ok(String::from_utf8(decoded)?);
        }

        codec::inflate_to_text(&decoded)
    }
}
