//! # smd-store
//!
//! Bounded history of decoded SAML messages.
//!
//! The [`MessageStore`] keeps messages in capture order and drops the oldest
//! ones once the configured capacity is exceeded. Persistence goes through a
//! [`MessageBackend`]:
//!
//! - [`InMemoryBackend`] - No persistence, for tests and embedded use
//! - [`JsonFileBackend`] - The history as a JSON array on disk
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use smd_core::SharedSettings;
//! use smd_store::{JsonFileBackend, MessageStore};
//!
//! let store = MessageStore::open(
//!     JsonFileBackend::in_dir(&data_dir),
//!     Arc::new(SharedSettings::default()),
//! );
//! store.append(message)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod store;

pub use backend::{InMemoryBackend, JsonFileBackend, MessageBackend, MESSAGES_FILE_NAME};
pub use error::{StoreError, StoreResult};
pub use store::MessageStore;
