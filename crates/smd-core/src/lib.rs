//! # smd-core
//!
//! Core types, settings, and error handling for the SAML message decoder.
//!
//! This crate provides the types shared by the decoding pipeline, the
//! message store, and the command-line front end:
//!
//! - [`message`] - The decoded message record kept in the history
//! - [`config`] - User settings and the providers that serve them
//! - [`error`] - Error types for settings access

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod message;

pub use config::{
    FileSettings, ScrollingDirection, Settings, SettingsProvider, SharedSettings,
    DEFAULT_MAX_STORED_MESSAGES, EXTENDED_MAX_STORED_MESSAGES,
};
pub use error::{Error, Result};
pub use message::{Binding, DecodedMessage, Parameter, SamlParameter};
