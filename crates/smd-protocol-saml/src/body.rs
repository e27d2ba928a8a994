//! POST body reconstruction.
//!
//! The interceptor hands over a POST body either as form fields the host
//! already parsed or as raw byte fragments. Both are normalized into the
//! ordered list of submitted fields.

use smd_core::Parameter;

use crate::capture::{FormData, RawChunk, RequestBody};
use crate::error::{SamlError, SamlResult};

/// Reconstructs the submitted form fields from a request body.
///
/// Pre-parsed form data wins over raw fragments. Repeated field names keep
/// every value in submission order.
pub fn reconstruct(body: &RequestBody) -> SamlResult<Vec<Parameter>> {
    if let Some(form_data) = body.form_data.as_ref().filter(|f| !f.is_empty()) {
        return Ok(from_form_data(form_data));
    }

    if let Some(raw) = body.raw.as_ref().filter(|r| !r.is_empty()) {
        let bytes = concat_fragments(raw)?;
        return Ok(parse_urlencoded(&bytes));
    }

    Err(SamlError::BodyReconstruction(
        "request body has neither form data nor raw bytes".to_string(),
    ))
}

/// Flattens pre-parsed form data into ordered fields.
#[must_use]
pub fn from_form_data(form_data: &FormData) -> Vec<Parameter> {
    form_data
        .iter()
        .flat_map(|(name, values)| values.iter().map(move |v| Parameter::new(name.as_str(), v.as_str())))
        .collect()
}

/// Joins raw fragments in order.
///
/// Fragments are joined as bytes before any text decoding, so a multi-byte
/// character split across two fragments survives.
pub fn concat_fragments(raw: &[RawChunk]) -> SamlResult<Vec<u8>> {
    let mut body = Vec::with_capacity(
        raw.iter()
            .map(|c| c.bytes.as_ref().map_or(0, Vec::len))
            .sum(),
    );

    for (index, chunk) in raw.iter().enumerate() {
        let bytes = chunk.bytes.as_ref().ok_or_else(|| {
            SamlError::BodyReconstruction(format!("fragment {index} carries no bytes"))
        })?;
        body.extend_from_slice(bytes);
    }

    Ok(body)
}

/// Parses an `application/x-www-form-urlencoded` body.
///
/// Invalid UTF-8 is replaced rather than rejected.
#[must_use]
pub fn parse_urlencoded(body: &[u8]) -> Vec<Parameter> {
    let text = String::from_utf8_lossy(body);
    url::form_urlencoded::parse(text.as_bytes())
        .map(|(name, value)| Parameter::new(name, value))
        .collect()
}
