//! HTTP-Redirect Binding decoding.
//!
//! The message travels in the query string as
//! `percent-encode(base64(deflate(xml)))`. The query parser undoes the
//! outer URL encoding; [`HttpRedirectBinding::decode`] undoes the rest.

use smd_core::{Binding, Parameter, SamlParameter};

use crate::codec;
use crate::error::SamlResult;

use super::{recognize, Classification, MissReason};

/// HTTP-Redirect binding classifier/decoder.
pub struct HttpRedirectBinding;

impl HttpRedirectBinding {
    /// Classifies a GET request URL.
    ///
    /// Only `SAMLRequest` and `SAMLResponse` are inspected; when both are
    /// present the request wins.
    #[must_use]
    pub fn classify(url: &str) -> Classification {
        let parsed = match url::Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::trace!(%url, error = %e, "unparseable request URL");
                return Classification::NotRecognized(MissReason::InvalidUrl);
            }
        };

        if parsed.query().map_or(true, str::is_empty) {
            return Classification::NotRecognized(MissReason::NoQueryString);
        }

        let parameters = parsed
            .query_pairs()
            .map(|(name, value)| Parameter::new(name, value))
            .collect();

        recognize(parameters, &SamlParameter::REDIRECT, Binding::Redirect)
    }

    /// Decodes a query parameter value into message text.
    ///
    /// The value must already be URL-decoded, as returned by
    /// [`classify`](Self::classify).
    pub fn decode(raw_value: &str) -> SamlResult<String> {
        let compressed = codec::base64_decode(raw_value)?;
        codec::inflate_to_text(&compressed)
    }
}
