//! Compression sniffing for HTTP-POST payloads.
//!
//! The HTTP-POST binding normally carries plain base64 XML, but some
//! deployments deflate the message as on the Redirect binding. Nothing on
//! the wire says which, so the decoder asks a [`CompressionSniffer`] after
//! the base64 stage.

/// Marker whose presence means the payload is already plain XML.
pub const XML_DECLARATION_MARKER: &str = "xml version";

/// Decides whether a base64-decoded POST payload is already uncompressed.
pub trait CompressionSniffer: Send + Sync {
    /// Returns `true` if `decoded` should be used as-is instead of inflated.
    fn is_uncompressed(&self, decoded: &[u8]) -> bool;
}

/// Treats any payload containing `xml version` as uncompressed.
///
/// Payloads without an XML declaration are always inflated, even if they
/// happen to be plain XML.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDeclarationSniffer;

impl CompressionSniffer for XmlDeclarationSniffer {
    fn is_uncompressed(&self, decoded: &[u8]) -> bool {
        let marker = XML_DECLARATION_MARKER.as_bytes();
        decoded.windows(marker.len()).any(|window| window == marker)
    }
}

impl<F> CompressionSniffer for F
where
    F: Fn(&[u8]) -> bool + Send + Sync,
{
    fn is_uncompressed(&self, decoded: &[u8]) -> bool {
        self(decoded)
    }
}
