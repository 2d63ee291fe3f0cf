//! proforma-cli library root.
//!
//! Re-exports internal modules so that integration tests can exercise the
//! config and command layer without spawning the binary.

pub mod commands;
pub mod config;
