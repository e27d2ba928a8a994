//! Command implementations.

pub mod config;
pub mod decode;
pub mod ingest;
pub mod messages;

pub use config::run_config;
pub use decode::{run_decode_post, run_decode_url};
pub use ingest::run_ingest;
pub use messages::{run_clear, run_export, run_list, run_show};
