//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use smd_core::ScrollingDirection;

use crate::output::OutputFormat;

/// File name used by `export` when no output path is given.
pub const DEFAULT_EXPORT_FILE: &str = "SAML Message Decoder Export.json";

/// SAML Message Decoder - capture and decode SAML Redirect and POST messages.
#[derive(Debug, Parser)]
#[command(name = "smd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding settings and stored messages.
    #[arg(long, env = "SMD_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a SAML message from an HTTP-Redirect URL.
    DecodeUrl {
        /// Full request URL including the query string.
        url: String,

        /// Also append the message to the stored history.
        #[arg(long)]
        store: bool,
    },

    /// Decode a SAML message from an HTTP-POST body.
    DecodePost(DecodePostArgs),

    /// Process captured transactions (one JSON object per line).
    Ingest {
        /// Capture file; reads stdin when omitted or `-`.
        input: Option<PathBuf>,
    },

    /// List stored messages.
    List,

    /// Show a stored message.
    Show {
        /// Message number as shown by `list` (1 = oldest).
        index: usize,
    },

    /// Clear stored messages.
    Clear,

    /// Export stored messages as JSON.
    Export {
        /// Output file.
        #[arg(long, default_value = DEFAULT_EXPORT_FILE)]
        output_file: PathBuf,
    },

    /// Settings management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `decode-post`.
#[derive(Debug, clap::Args)]
pub struct DecodePostArgs {
    /// Form field as NAME=VALUE (repeatable, value taken literally).
    #[arg(short, long = "field", value_name = "NAME=VALUE", conflicts_with = "body_file")]
    pub fields: Vec<String>,

    /// File holding a raw `application/x-www-form-urlencoded` body.
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Request URL recorded with the message.
    #[arg(long, default_value = "http://localhost/")]
    pub url: String,

    /// Also append the message to the stored history.
    #[arg(long)]
    pub store: bool,
}

/// Settings commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current settings.
    Show,

    /// Set how many messages are kept (10 by default, 100 is the large preset).
    SetMax {
        /// Maximum number of stored messages.
        max: usize,
    },

    /// Set the viewer scrolling direction.
    Scrolling {
        /// Scrolling direction.
        #[arg(value_enum)]
        direction: ScrollingArg,
    },

    /// Show the settings file path.
    Path,
}

/// Scrolling direction argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScrollingArg {
    /// Scroll horizontally (default).
    Horizontally,
    /// Scroll vertically.
    Vertically,
}

impl From<ScrollingArg> for ScrollingDirection {
    fn from(arg: ScrollingArg) -> Self {
        match arg {
            ScrollingArg::Horizontally => Self::Horizontally,
            ScrollingArg::Vertically => Self::Vertically,
        }
    }
}
