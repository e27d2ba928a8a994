//! # smd-cli
//!
//! Command-line front end for the SAML message decoder.
//!
//! - Decode a single Redirect URL or POST body
//! - Ingest captured traffic into the bounded message history
//! - List, show, clear and export stored messages
//! - Manage settings (history size, viewer scrolling direction)

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use context::AppContext;
pub use error::{CliError, CliResult};
