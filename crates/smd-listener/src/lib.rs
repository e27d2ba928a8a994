//! # smd-listener
//!
//! Capture pipeline for the SAML message decoder.
//!
//! [`SamlListener`] receives captured HTTP transactions, classifies them,
//! decodes recognized SAML messages and appends them to the message store.
//! It can be driven one transaction at a time with
//! [`SamlListener::handle`] or fed through a channel with
//! [`SamlListener::run`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod listener;

pub use listener::{ListenerStats, Outcome, SamlListener};
