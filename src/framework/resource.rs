//! # Resources
//!
//! A [`Resource<K>`] is one remote entity of kind `K`: an optional server-assigned id
//! plus an [`Attributes`] map. The kind is a zero-sized marker implementing
//! [`ResourceEntity`], which supplies the resource name and collection path. This lets
//! the compiler keep a `Resource<Person>` apart from a `Resource<QuestionSet>` while all
//! kinds share one implementation.
//!
//! ## Lifecycle
//!
//! ```text
//!   Resource::new(attrs)            save()                  save()
//!  ---------------------->  Draft  --------> Persisted  ------------> Persisted
//!                          (no id)   create   (has id)      update
//! ```
//!
//! A draft built through an association carries an [`OwnerLink`]. Saving such a draft
//! first makes sure the owner exists remotely (persisting it if needed), injects the
//! owner's id as the foreign key, and only then creates the child.

use crate::error::{Result, TransportError};
use crate::framework::client::ResourceClient;
use crate::framework::value::{Attributes, Value};
use async_trait::async_trait;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};
use tracing::{info, instrument};

/// Marker trait for a kind of remote resource.
pub trait ResourceEntity: Send + Sync + 'static {
    /// Singular snake_case name, e.g. `"question_set"`.
    const NAME: &'static str;

    /// Collection path relative to the API host, e.g. `"/question_sets"`.
    const PATH: &'static str;
}

/// Lifecycle state, derived from whether an id has been assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    Draft,
    Persisted,
}

/// The owner a draft must be attached to before it can be created.
#[async_trait]
pub trait OwnerLink: Send + Sync {
    /// Attribute on the draft that references the owner.
    fn foreign_key(&self) -> &str;

    /// Returns the owner's id, creating the owner first if it is still a draft.
    async fn ensure_persisted(&self) -> Result<String>;
}

/// A resource shared between its holder and the associations bound to it.
pub type SharedResource<K> = Arc<RwLock<Resource<K>>>;

/// One remote entity.
pub struct Resource<K: ResourceEntity> {
    id: Option<String>,
    attributes: Attributes,
    owner: Option<Arc<dyn OwnerLink>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceEntity> Resource<K> {
    /// A draft with the given attributes and no id.
    pub fn new(attributes: Attributes) -> Self {
        Self {
            id: None,
            attributes,
            owner: None,
            _kind: PhantomData,
        }
    }

    /// Decodes a JSON object returned by the API.
    ///
    /// The resource is persisted when the object carries a string `"id"`.
    pub fn from_json(json: serde_json::Value) -> Result<Self, TransportError> {
        match Value::from(json) {
            Value::Map(attributes) => {
                let id = attributes.get("id").and_then(Value::as_str).map(str::to_owned);
                Ok(Self {
                    id,
                    attributes,
                    owner: None,
                    _kind: PhantomData,
                })
            }
            other => Err(TransportError::Decode(format!(
                "expected {} object, got {}",
                K::NAME,
                other
            ))),
        }
    }

    pub(crate) fn with_owner(mut self, owner: Arc<dyn OwnerLink>) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> ResourceState {
        match self.id {
            Some(_) => ResourceState::Persisted,
            None => ResourceState::Draft,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.state() == ResourceState::Persisted
    }

    pub fn resource_name(&self) -> &'static str {
        K::NAME
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_list(&self, key: &str) -> &[Value] {
        self.get(key).and_then(Value::as_list).unwrap_or(&[])
    }

    /// String entries of a list attribute, e.g. embedded ids.
    pub fn get_ids(&self, key: &str) -> Vec<String> {
        self.get_list(key)
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    }

    /// Sets an attribute locally; nothing is sent until [`save`](Self::save).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn into_shared(self) -> SharedResource<K> {
        Arc::new(RwLock::new(self))
    }

    /// Writes the resource to the API.
    ///
    /// - **Draft**: persists the owner first when one is attached, sets the foreign key to
    ///   the owner's id, then creates the resource. On success the attributes are replaced
    ///   by the server's representation and the id is assigned.
    /// - **Persisted**: sends the current attributes as an update.
    ///
    /// On failure the local state is left untouched.
    #[instrument(skip_all, fields(resource = K::NAME, id = ?self.id))]
    pub async fn save(&mut self, client: &ResourceClient<K>) -> Result<()> {
        let saved = match &self.id {
            None => {
                let mut params = self.attributes.clone();
                if let Some(owner) = &self.owner {
                    let owner_id = owner.ensure_persisted().await?;
                    params.insert(owner.foreign_key().to_string(), Value::from(owner_id));
                }
                client.create(params).await?
            }
            Some(id) => client.update(id, self.attributes.clone()).await?,
        };

        if saved.id.is_none() {
            return Err(TransportError::Decode(format!("saved {} has no id", K::NAME)).into());
        }
        info!(id = ?saved.id, "Saved");
        self.id = saved.id;
        self.attributes = saved.attributes;
        self.owner = None;
        Ok(())
    }
}

impl<K: ResourceEntity> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            attributes: self.attributes.clone(),
            owner: self.owner.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceEntity> PartialEq for Resource<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.attributes == other.attributes
    }
}

impl<K: ResourceEntity> fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(K::NAME)
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("owned", &self.owner.is_some())
            .finish()
    }
}

/// Decodes a single object.
pub fn decode_one<K: ResourceEntity>(json: serde_json::Value) -> Result<Resource<K>, TransportError> {
    Resource::from_json(json)
}

/// Unwraps a JSON array, or the array inside a `{"data": [...]}` list envelope.
///
/// `what` names the expected items in the error message.
pub fn unwrap_list(
    json: serde_json::Value,
    what: &str,
) -> Result<Vec<serde_json::Value>, TransportError> {
    match json {
        serde_json::Value::Array(items) => Ok(items),
        serde_json::Value::Object(mut map) => match map.remove("data") {
            Some(serde_json::Value::Array(items)) => Ok(items),
            _ => Err(TransportError::Decode(format!(
                "expected list of {what}, got object"
            ))),
        },
        other => Err(TransportError::Decode(format!(
            "expected list of {what}, got {other}"
        ))),
    }
}

/// Decodes a JSON array, or a `{"data": [...]}` list envelope, into resources.
pub fn decode_many<K: ResourceEntity>(
    json: serde_json::Value,
) -> Result<Vec<Resource<K>>, TransportError> {
    unwrap_list(json, K::NAME)?
        .into_iter()
        .map(Resource::from_json)
        .collect()
}
