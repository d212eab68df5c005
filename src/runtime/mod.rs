//! Runtime setup for binaries using the client.
//!
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod tracing;

pub use self::tracing::setup_tracing;
