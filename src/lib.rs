//! # BlockScore
//!
//! > **A typed async client for the BlockScore identity verification API.**
//!
//! The API exposes people, companies, verifications, question sets and watchlists as
//! plain REST resources. This crate maps each of them onto one generic
//! [`ResourceClient<K>`](framework::ResourceClient) and adds the piece the API leaves to
//! the client: parent-scoped collections of child resources.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Generics: The Power of `K`
//! You'll see `ResourceClient<K: ResourceEntity>` everywhere. `K` is a zero-sized marker
//! (`Person`, `QuestionSet`, ...) that supplies the resource name and path.
//! -   **Benefit**: CRUD, decoding and error mapping are written **once**.
//! -   **Trade-off**: Attributes are dynamic ([`framework::Value`]); typed accessors are
//!     layered on top per kind in [`model`].
//!
//! ### Associations
//! A person embeds its question set ids (`question_sets: ["qs_1", ...]`) and every
//! question set points back through `person_id`. [`Association`] turns that into a
//! cached collection with foreign-key checks and correct save ordering. See the
//! [`association`] module for the full contract.
//!
//! ### Mocking: Testing without the Network
//! [`MockTransport`](framework::mock::MockTransport) replaces HTTP with an ordered queue
//! of expected requests. See the [`framework::mock`] module for a guide.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! One [`Error`] enum covers configuration, transport and association failures.
//! Non-2xx responses are classified into [`ApiErrorKind`]s.
//!
//! ### 2. Explicit Context
//! Credentials live in a [`BlockScore`] context, not in global state. Multiple contexts
//! with different keys can be used side by side.
//!
//! ### 3. Observability
//! `tracing` spans wrap every operation. See [`runtime::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Resources, the transport seam, and the generic CRUD client.
//! - **Key items**: [`ResourceEntity`](framework::ResourceEntity),
//!   [`Resource`](framework::Resource), [`Transport`](framework::Transport).
//!
//! ### 2. The Core ([`association`])
//! - **Role**: Parent-scoped child collections and cascading draft saves.
//! - **Key items**: [`Association`], [`HasMany`](association::HasMany).
//!
//! ### 3. The Interface ([`clients`], [`context`])
//! - **Role**: Domain-specific clients handed out by the [`BlockScore`] context.
//! - **Key items**: [`PersonClient`](clients::PersonClient),
//!   [`WatchlistClient`](clients::WatchlistClient).
//!
//! ### 4. The Resources ([`model`])
//! - **Role**: Marker types, typed accessors and create payloads.
//!
//! ## 🚀 Quick Start
//!
//! ```no_run
//! use blockscore::{BlockScore, Config};
//! use blockscore::framework::to_attributes;
//! use serde_json::json;
//!
//! # async fn run() -> blockscore::Result<()> {
//! let client = BlockScore::new(Config::new("sk_test_..."))?;
//! let people = client.people();
//!
//! let person = blockscore::clients::ApiClient::retrieve(&people, "p_1").await?.into_shared();
//! let mut question_sets = people.question_sets(&person).await?;
//! let created = question_sets.create(to_attributes(json!({})).unwrap_or_default()).await?;
//! println!("{:?}", created.id());
//! # Ok(())
//! # }
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! BLOCKSCORE_API_KEY=sk_test_... RUST_LOG=info cargo run
//! ```

pub mod association;
pub mod clients;
pub mod config;
pub mod context;
pub mod error;
pub mod framework;
pub mod model;
pub mod runtime;

pub use association::Association;
pub use config::Config;
pub use context::BlockScore;
pub use error::{ApiErrorKind, Error, Result, TransportError};
