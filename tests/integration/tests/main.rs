//! End-to-End Integration Tests
//!
//! These tests drive captured traffic through classification, decoding and
//! the bounded message store, using temporary data directories.

mod common;
mod listener;
mod message_store;
mod post_binding;
