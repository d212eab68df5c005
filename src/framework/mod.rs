//! Generic resource framework for the BlockScore API.
//!
//! This module provides the building blocks every resource kind shares: a dynamic
//! attribute model, the transport seam, and a type-safe CRUD client.
//!
//! # Main Components
//!
//! - [`ResourceEntity`] - Trait that resource marker types implement
//! - [`Resource`] - One remote entity with an optional id and its attributes
//! - [`ResourceClient`] - Type-safe CRUD client for one resource kind
//! - [`Transport`] / [`HttpTransport`] - One authenticated round trip per call
//! - [`Value`] / [`Attributes`] - Dynamic attribute values
//!
//! # Testing
//!
//! See the [`mock`] module for an in-memory transport with ordered expectations.

pub mod client;
pub mod mock;
pub mod naming;
pub mod resource;
pub mod transport;
pub mod value;

pub use client::ResourceClient;
pub use resource::{OwnerLink, Resource, ResourceEntity, ResourceState, SharedResource};
pub use transport::{HttpTransport, Method, Response, Transport};
pub use value::{serialize_params, to_attributes, Attributes, Value};
