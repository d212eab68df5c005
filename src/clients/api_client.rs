//! # ApiClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default `create`,
//! `retrieve` and `list` methods built on top of a generic `ResourceClient`.
use crate::error::Result;
use crate::framework::{Attributes, Resource, ResourceClient, ResourceEntity};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// # Example
///
/// ```rust
/// use blockscore::clients::ApiClient;
/// use blockscore::framework::{ResourceClient, ResourceEntity};
///
/// // 1. Define the resource kind
/// struct Invoice;
/// impl ResourceEntity for Invoice {
///     const NAME: &'static str = "invoice";
///     const PATH: &'static str = "/invoices";
/// }
///
/// // 2. Define the client wrapper
/// struct InvoiceClient {
///     inner: ResourceClient<Invoice>,
/// }
///
/// // 3. Implement ApiClient
/// impl ApiClient<Invoice> for InvoiceClient {
///     fn inner(&self) -> &ResourceClient<Invoice> {
///         &self.inner
///     }
/// }
///
/// // 4. Usage
/// async fn usage(client: InvoiceClient) {
///     // create(), retrieve() and list() are provided automatically!
///     let _ = client.retrieve("inv_1").await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ApiClient<K: ResourceEntity>: Send + Sync {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<K>;

    /// Create a resource from raw attributes.
    #[tracing::instrument(skip(self, params), fields(resource = K::NAME))]
    async fn create(&self, params: Attributes) -> Result<Resource<K>> {
        tracing::debug!("Sending request");
        self.inner().create(params).await
    }

    /// Fetch a resource by id.
    #[tracing::instrument(skip(self), fields(resource = K::NAME))]
    async fn retrieve(&self, id: &str) -> Result<Resource<K>> {
        tracing::debug!("Sending request");
        self.inner().retrieve(id).await
    }

    /// List resources of this kind.
    #[tracing::instrument(skip(self), fields(resource = K::NAME))]
    async fn list(&self) -> Result<Vec<Resource<K>>> {
        tracing::debug!("Sending request");
        self.inner().list().await
    }
}
