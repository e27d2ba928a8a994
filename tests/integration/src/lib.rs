//! Wire fixtures for the end-to-end tests.
//!
//! These encoders build SAML traffic the way identity and service providers
//! put it on the wire, independently of the decoder under test.

use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::{write::DeflateEncoder, Compression};

/// A minimal AuthnRequest with an XML declaration.
pub const AUTHN_REQUEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?><samlp:AuthnRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" ID="_a1" Version="2.0" IssueInstant="2026-10-18T09:30:00Z" AssertionConsumerServiceURL="https://sp.example/acs"><saml:Issuer xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion">https://sp.example</saml:Issuer></samlp:AuthnRequest>"#;

/// A minimal Response with an XML declaration.
pub const RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?><samlp:Response xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" ID="_r1" InResponseTo="_a1" Version="2.0" IssueInstant="2026-10-18T09:30:01Z"><samlp:Status><samlp:StatusCode Value="urn:oasis:names:tc:SAML:2.0:status:Success"/></samlp:Status></samlp:Response>"#;

/// A LogoutRequest without an XML declaration.
pub const LOGOUT_REQUEST: &str = r#"<samlp:LogoutRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" ID="_l1" Version="2.0"/>"#;

/// Raw DEFLATE (no zlib header) at the default level.
pub fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Standard padded base64.
pub fn base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// The HTTP-Redirect wire form of a message: deflate, base64, percent-encode.
pub fn redirect_value(xml: &str) -> io::Result<String> {
    Ok(urlencoding::encode(&base64(&deflate(xml.as_bytes())?)).into_owned())
}

/// A Redirect URL carrying `xml` in `parameter`, followed by a RelayState.
pub fn redirect_url(base: &str, parameter: &str, xml: &str) -> io::Result<String> {
    Ok(format!("{base}?{parameter}={}&RelayState=abc", redirect_value(xml)?))
}

/// An `application/x-www-form-urlencoded` POST body carrying base64 `xml`.
pub fn post_body(parameter: &str, xml: &str) -> String {
    format!(
        "{parameter}={}&RelayState=abc",
        urlencoding::encode(&base64(xml.as_bytes()))
    )
}

/// Splits a body into `parts` roughly equal fragments.
pub fn fragments(body: &[u8], parts: usize) -> Vec<Vec<u8>> {
    let size = body.len().div_ceil(parts.max(1)).max(1);
    body.chunks(size).map(<[u8]>::to_vec).collect()
}
