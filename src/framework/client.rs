//! # Generic Resource Client
//!
//! [`ResourceClient<K>`] implements the CRUD contract for any [`ResourceEntity`] on top
//! of a [`Transport`]. Every method is exactly one round trip; responses go through
//! [`classify`] so that non-2xx statuses surface as typed errors.

use crate::error::{classify, Result};
use crate::framework::resource::{decode_many, decode_one, Resource, ResourceEntity};
use crate::framework::transport::{Method, Transport};
use crate::framework::value::Attributes;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A type-safe client for one kind of remote resource.
///
/// * **Cloneable** - holds only a shared transport handle.
/// * **Generic** - `ResourceClient<Person>` and `ResourceClient<Company>` share this code
///   but cannot be mixed up.
pub struct ResourceClient<K: ResourceEntity> {
    transport: Arc<dyn Transport>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceEntity> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceEntity> ResourceClient<K> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _kind: PhantomData,
        }
    }

    /// Singular resource name used for foreign keys and embedded id lists.
    pub fn resource_name(&self) -> &'static str {
        K::NAME
    }

    pub fn path(&self) -> &'static str {
        K::PATH
    }

    fn member_path(id: &str) -> String {
        format!("{}/{}", K::PATH, id)
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Attributes>,
    ) -> Result<serde_json::Value> {
        let response = self.transport.request(method, path, body).await?;
        Ok(classify(response)?)
    }

    #[instrument(skip(self, params), fields(resource = K::NAME))]
    pub async fn create(&self, params: Attributes) -> Result<Resource<K>> {
        debug!(?params, "Create");
        let json = self.call(Method::Post, K::PATH, Some(&params)).await?;
        Ok(decode_one(json)?)
    }

    #[instrument(skip(self), fields(resource = K::NAME))]
    pub async fn retrieve(&self, id: &str) -> Result<Resource<K>> {
        let json = self.call(Method::Get, &Self::member_path(id), None).await?;
        Ok(decode_one(json)?)
    }

    #[instrument(skip(self, params), fields(resource = K::NAME))]
    pub async fn update(&self, id: &str, params: Attributes) -> Result<Resource<K>> {
        debug!(?params, "Update");
        let json = self
            .call(Method::Patch, &Self::member_path(id), Some(&params))
            .await?;
        Ok(decode_one(json)?)
    }

    /// `PUT {path}/{id}`, for resources the API edits by full replacement.
    #[instrument(skip(self, params), fields(resource = K::NAME))]
    pub async fn replace(&self, id: &str, params: Attributes) -> Result<Resource<K>> {
        debug!(?params, "Replace");
        let json = self
            .call(Method::Put, &Self::member_path(id), Some(&params))
            .await?;
        Ok(decode_one(json)?)
    }

    #[instrument(skip(self), fields(resource = K::NAME))]
    pub async fn list(&self) -> Result<Vec<Resource<K>>> {
        let json = self.call(Method::Get, K::PATH, None).await?;
        Ok(decode_many(json)?)
    }

    /// Deletes the resource; the API echoes the deleted object back.
    #[instrument(skip(self), fields(resource = K::NAME))]
    pub async fn delete(&self, id: &str) -> Result<Resource<K>> {
        let json = self.call(Method::Delete, &Self::member_path(id), None).await?;
        Ok(decode_one(json)?)
    }

    /// `POST {path}/{id}/{action}` for resource-specific operations.
    #[instrument(skip(self, params), fields(resource = K::NAME))]
    pub async fn post_action(
        &self,
        id: &str,
        action: &str,
        params: Attributes,
    ) -> Result<serde_json::Value> {
        let path = format!("{}/{}", Self::member_path(id), action);
        self.call(Method::Post, &path, Some(&params)).await
    }

    /// `GET {path}/{id}/{action}` for resource-specific sub-collections.
    #[instrument(skip(self), fields(resource = K::NAME))]
    pub async fn get_action(&self, id: &str, action: &str) -> Result<serde_json::Value> {
        let path = format!("{}/{}", Self::member_path(id), action);
        self.call(Method::Get, &path, None).await
    }

    /// `POST {path}` returning raw JSON, for endpoints that are searches rather than creates.
    #[instrument(skip(self, params), fields(resource = K::NAME))]
    pub async fn post_collection(&self, params: Attributes) -> Result<serde_json::Value> {
        self.call(Method::Post, K::PATH, Some(&params)).await
    }
}
