//! Binary transforms used by the SAML bindings.
//!
//! The HTTP-Redirect binding carries `percent-encode(base64(deflate(xml)))`.
//! The inverse stages live here, together with the forward stages used to
//! build test traffic.

use std::io::{Read, Write};

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::error::{SamlError, SamlResult};

/// Base64 engine mirroring the browser's forgiving decoder: padding is
/// optional and stray trailing bits are ignored.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes standard base64, skipping ASCII whitespace.
pub fn base64_decode(input: &str) -> SamlResult<Vec<u8>> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(FORGIVING.decode(compact)?)
}

/// Encodes bytes as padded standard base64.
#[must_use]
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Compresses data using DEFLATE (raw, no zlib header).
pub fn deflate_raw(data: &[u8]) -> SamlResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| SamlError::Deflate(format!("compression error: {e}")))?;
    encoder
        .finish()
        .map_err(|e| SamlError::Deflate(format!("compression finish error: {e}")))
}

/// Decompresses raw DEFLATE data.
pub fn inflate_raw(data: &[u8]) -> SamlResult<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| SamlError::Deflate(format!("decompression error: {e}")))?;
    Ok(decompressed)
}

/// Percent-decodes text.
///
/// Every `%` must start a two-digit hex escape and the decoded bytes must be
/// valid UTF-8. `+` is not treated as a space.
pub fn percent_decode(text: &str) -> SamlResult<String> {
    let bytes = text.as_bytes();
    for (i, _) in bytes.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let escape = bytes.get(i + 1..i + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(SamlError::PercentDecode(format!(
                "malformed escape at byte {i}"
            )));
        }
    }

    urlencoding::decode(text)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| SamlError::PercentDecode(e.to_string()))
}

/// Percent-encodes everything except unreserved characters.
#[must_use]
pub fn percent_encode(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Inflates a compressed payload and percent-decodes the resulting text.
pub fn inflate_to_text(compressed: &[u8]) -> SamlResult<String> {
    let inflated = inflate_raw(compressed)?;
    let text = String::from_utf8(inflated)?;
    percent_decode(&text)
}
