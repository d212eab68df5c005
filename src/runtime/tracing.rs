//! # Observability & Tracing
//!
//! Every client and association operation runs inside a `tracing` span named after the
//! operation, with the resource kind as a field. Payloads are logged once at `debug`
//! level; successful state changes at `info`; rejected operations and non-2xx
//! responses at `warn`. Errors are always returned to the caller as well.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show request payloads and cache hits
//! RUST_LOG=debug cargo run
//!
//! # Only the association layer
//! RUST_LOG=blockscore::association=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! Creating a question set through a person that is still a draft, with
//! `RUST_LOG=debug`:
//!
//! ```text
//! DEBUG Built draft member child="question_set"
//! INFO save:ensure_persisted: Saving parent before child parent="person"
//! DEBUG save:ensure_persisted:save:create: Create params={"name_first": String("John"), ...}
//! INFO save:ensure_persisted:save: Saved id=Some("p_1")
//! DEBUG save:create: Create params={"person_id": String("p_1")}
//! INFO save: Saved id=Some("qs_1")
//! ```
//!
//! The parent is always saved before the child create is sent.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
