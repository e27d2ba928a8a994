//! SAML binding classification and decoding.
//!
//! This module recognizes the SAML 2.0 bindings in captured traffic:
//!
//! - **HTTP-Redirect Binding** - GET with the message deflated, base64- and URL-encoded in the query
//! - **HTTP-POST Binding** - POST with the message base64-encoded in a form field
//!
//! [`classify`] turns a captured transaction into an explicit
//! [`Classification`]; only [`Classification::Recognized`] values reach the
//! wire decoder.
//!
//! # Usage
//!
//! ```rust,ignore
//! use smd_protocol_saml::bindings::{classify, Classification};
//!
//! if let Classification::Recognized(message) = classify(&request) {
//!     let xml = decoder.decode(&message)?;
//! }
//! ```

mod post;
mod redirect;

pub use post::*;
pub use redirect::*;

use smd_core::{Binding, Parameter, SamlParameter};

use crate::capture::CapturedRequest;

/// A transaction that carries a SAML message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    /// Parameter that carries the message.
    pub parameter: SamlParameter,
    /// Binding the message arrived on.
    pub binding: Binding,
    /// The message value as transmitted, before base64 decoding.
    pub raw_value: String,
    /// Every query or form parameter of the transaction, in order.
    pub parameters: Vec<Parameter>,
}

/// Why a transaction was not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// Neither GET nor POST.
    UnsupportedMethod,
    /// The request URL could not be parsed.
    InvalidUrl,
    /// GET without a query string.
    NoQueryString,
    /// POST without a body.
    NoBody,
    /// POST body in a shape that could not be reconstructed.
    UnreadableBody,
    /// None of the recognized parameters is present with a value.
    NoSamlParameter,
}

impl MissReason {
    /// Returns a short description for diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedMethod => "unsupported method",
            Self::InvalidUrl => "invalid URL",
            Self::NoQueryString => "no query string",
            Self::NoBody => "no request body",
            Self::UnreadableBody => "unreadable request body",
            Self::NoSamlParameter => "no SAML parameter",
        }
    }
}

impl std::fmt::Display for MissReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a captured transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The transaction carries a SAML message.
    Recognized(Recognized),
    /// The transaction carries nothing of interest. This is the normal case.
    NotRecognized(MissReason),
}

impl Classification {
    /// Returns the recognized message, if any.
    #[must_use]
    pub fn recognized(self) -> Option<Recognized> {
        match self {
            Self::Recognized(message) => Some(message),
            Self::NotRecognized(_) => None,
        }
    }

    /// Returns whether the transaction carries a SAML message.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized(_))
    }
}

/// Classifies a captured transaction.
///
/// GET requests go down the Redirect path, POST requests down the POST path;
/// any other method is ignored.
#[must_use]
pub fn classify(request: &CapturedRequest) -> Classification {
    if request.is_get() {
        HttpRedirectBinding::classify(&request.url)
    } else if request.is_post() {
        HttpPostBinding::classify(request.request_body.as_ref())
    } else {
        Classification::NotRecognized(MissReason::UnsupportedMethod)
    }
}

/// Picks the message parameter by priority.
///
/// For each candidate in order, the first occurrence with a non-empty value
/// wins.
fn select_message(
    parameters: &[Parameter],
    candidates: &[SamlParameter],
) -> Option<(SamlParameter, String)> {
    candidates.iter().find_map(|candidate| {
        parameters
            .iter()
            .find(|p| p.name == candidate.as_str() && !p.value.is_empty())
            .map(|p| (*candidate, p.value.clone()))
    })
}

fn recognize(
    parameters: Vec<Parameter>,
    candidates: &[SamlParameter],
    binding: Binding,
) -> Classification {
    match select_message(&parameters, candidates) {
        Some((parameter, raw_value)) => Classification::Recognized(Recognized {
            parameter,
            binding,
            raw_value,
            parameters,
        }),
        None => Classification::NotRecognized(MissReason::NoSamlParameter),
    }
}
