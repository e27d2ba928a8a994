//! Wire decoder.
//!
//! Runs the decode pipeline that matches the binding of a recognized
//! message and produces the [`DecodedMessage`] record.

use std::sync::Arc;

use smd_core::{Binding, DecodedMessage};

use crate::bindings::{HttpPostBinding, HttpRedirectBinding, Recognized};
use crate::error::SamlResult;
use crate::sniff::{CompressionSniffer, XmlDeclarationSniffer};

/// Decodes recognized SAML messages.
#[derive(Clone)]
pub struct WireDecoder {
    sniffer: Arc<dyn CompressionSniffer>,
}

impl Default for WireDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WireDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WireDecoder").finish_non_exhaustive()
    }
}

impl WireDecoder {
    /// Creates a decoder using the XML-declaration sniffer for POST payloads.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sniffer(XmlDeclarationSniffer)
    }

    /// Creates a decoder with a custom POST compression sniffer.
    #[must_use]
    pub fn with_sniffer(sniffer: impl CompressionSniffer + 'static) -> Self {
        Self {
            sniffer: Arc::new(sniffer),
        }
    }

    /// Decodes the message text.
    pub fn decode(&self, message: &Recognized) -> SamlResult<String> {
        match message.binding {
            Binding::Redirect => HttpRedirectBinding::decode(&message.raw_value),
            Binding::Post => HttpPostBinding::decode(&message.raw_value, self.sniffer.as_ref()),
        }
    }

    /// Decodes the message and builds the record, stamped with the current time.
    pub fn decode_message(&self, message: Recognized) -> SamlResult<DecodedMessage> {
        let content = self.decode(&message)?;
        Ok(DecodedMessage::new(
            message.parameter,
            message.binding,
            content,
            message.parameters,
        ))
    }
}
