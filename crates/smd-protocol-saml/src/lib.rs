//! SAML binding decoding for captured HTTP traffic.
//!
//! This crate turns captured HTTP transactions into readable SAML messages:
//!
//! - **Binding classification** - Recognize HTTP-Redirect and HTTP-POST transactions carrying a message
//! - **POST body reconstruction** - Normalize pre-parsed form data and raw body fragments
//! - **Wire decoding** - base64, raw DEFLATE and percent-decoding per binding
//!
//! # Architecture
//!
//! - [`capture`] - Captured transaction records
//! - [`bindings`] - Classification and per-binding decode pipelines
//! - [`body`] - POST body reconstruction
//! - [`codec`] - base64, DEFLATE and percent-encoding stages
//! - [`sniff`] - POST compression sniffing policy
//! - [`decoder`] - The wire decoder producing message records
//! - [`error`] - Error types for decoding
//!
//! # Example
//!
//! ```rust,ignore
//! use smd_protocol_saml::{classify, CapturedRequest, Classification, WireDecoder};
//!
//! let request = CapturedRequest::get(url);
//! if let Classification::Recognized(message) = classify(&request) {
//!     let record = WireDecoder::new().decode_message(message)?;
//!     println!("{}", record.content);
//! }
//! ```
//!
//! Signatures are not verified and the XML is not validated.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bindings;
pub mod body;
pub mod capture;
pub mod codec;
pub mod decoder;
pub mod error;
pub mod sniff;

pub use bindings::{classify, Classification, MissReason, Recognized};
pub use capture::{CapturedRequest, FormData, RawChunk, RequestBody};
pub use decoder::WireDecoder;
pub use error::{SamlError, SamlResult};
pub use sniff::{CompressionSniffer, XmlDeclarationSniffer};
