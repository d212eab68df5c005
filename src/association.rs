//! # Associations
//!
//! The API represents a one-to-many relationship only as an ordered list of child ids
//! embedded in the parent (`person.question_sets = ["qs_1", "qs_2"]`), with each child
//! pointing back through a foreign key (`question_set.person_id`).
//!
//! [`Association<P, C>`] is the client-side view of such a relationship. It is bound to
//! one parent through a weak reference and keeps:
//!
//! - `member_ids`: the ids known to belong to the parent, in order.
//! - `members`: the materialized children, persisted ones and drafts built locally.
//!
//! ## Operations
//!
//! | Operation | Network | Effect |
//! |-----------|---------|--------|
//! | [`load`](Association::load) | one `retrieve` per embedded id | binds and fills the collection |
//! | [`all`](Association::all) | none | the materialized members |
//! | [`build`](Association::build) | none | appends a draft with the foreign key set |
//! | [`create`](Association::create) | one `create` | requires a persisted parent |
//! | [`retrieve`](Association::retrieve) | zero or one `retrieve` | cached by id, foreign key checked |
//! | [`refresh`](Association::refresh) | one `retrieve` per embedded id | replaces the cache |
//!
//! A failed operation leaves `member_ids` and `members` exactly as they were.
//!
//! ## Save ordering
//!
//! Drafts from [`build`](Association::build) carry a [`ParentLink`]. Saving one persists
//! the parent first when it has no id yet, then creates the child with the parent's id
//! as its foreign key. The API rejects children whose foreign key does not reference an
//! existing parent, so the child create is never attempted before the parent has an id.
//!
//! ## Concurrency
//!
//! Mutating operations take `&mut self`, so checking the cache and appending to it is
//! exclusive per collection. A child that comes back with an id already cached replaces
//! the cached member instead of being appended, so no two members share an id. Callers
//! must not mutate the parent while a [`refresh`](Association::refresh) is in flight.

use crate::error::{Error, Result, TransportError};
use crate::framework::naming;
use crate::framework::{
    Attributes, OwnerLink, Resource, ResourceClient, ResourceEntity, SharedResource, Value,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};
use tracing::{debug, info, instrument, warn};

/// Declares that resources of kind `Self` own many resources of kind `C`.
///
/// Both keys default to the API's naming convention; override them only for
/// relationships that deviate from it.
///
/// ```
/// use blockscore::association::HasMany;
/// use blockscore::model::{Person, QuestionSet};
///
/// assert_eq!(<Person as HasMany<QuestionSet>>::embedded_ids_key(), "question_sets");
/// assert_eq!(<Person as HasMany<QuestionSet>>::foreign_key(), "person_id");
/// ```
pub trait HasMany<C: ResourceEntity>: ResourceEntity {
    /// Parent attribute holding the embedded child ids.
    fn embedded_ids_key() -> String {
        naming::pluralize(C::NAME)
    }

    /// Child attribute referencing the parent.
    fn foreign_key() -> String {
        naming::foreign_key(Self::NAME)
    }
}

/// A parent-scoped, cached collection of child resources.
pub struct Association<P: HasMany<C>, C: ResourceEntity> {
    parent: Weak<RwLock<Resource<P>>>,
    parent_client: ResourceClient<P>,
    client: ResourceClient<C>,
    member_ids: Vec<String>,
    members: Vec<Resource<C>>,
}

impl<P: HasMany<C>, C: ResourceEntity> Association<P, C> {
    /// Binds a collection to `parent` and fetches every embedded child.
    #[instrument(skip_all, fields(parent = P::NAME, child = C::NAME))]
    pub async fn load(
        parent: &SharedResource<P>,
        parent_client: ResourceClient<P>,
        client: ResourceClient<C>,
    ) -> Result<Self> {
        let mut association = Self {
            parent: Arc::downgrade(parent),
            parent_client,
            client,
            member_ids: Vec::new(),
            members: Vec::new(),
        };
        association.refresh().await?;
        Ok(association)
    }

    /// The materialized members. Never touches the network.
    pub fn all(&self) -> &[Resource<C>] {
        &self.members
    }

    /// Builds a draft child from `params` with the foreign key set to the parent's id.
    ///
    /// The foreign key is `null` while the parent is a draft itself; it is filled in when
    /// the child is saved. The draft is appended to the members but not to the member
    /// ids, since the API does not know it yet.
    #[doc(alias = "new")]
    pub fn build(&mut self, params: Attributes) -> Result<&mut Resource<C>> {
        let foreign_key = P::foreign_key();
        let mut attributes = params;
        attributes.insert(foreign_key.clone(), Value::from(self.parent_id()?));

        let link = ParentLink {
            parent: self.parent.clone(),
            client: self.parent_client.clone(),
            foreign_key,
        };
        let draft = Resource::new(attributes).with_owner(Arc::new(link));
        debug!(child = C::NAME, "Built draft member");

        let index = self.members.len();
        self.members.push(draft);
        Ok(&mut self.members[index])
    }

    /// Creates a child under the parent.
    ///
    /// Fails with [`Error::Precedence`] without any request when the parent has no id.
    /// The parent's id always wins over a foreign key present in `params`.
    #[instrument(skip(self, params), fields(parent = P::NAME, child = C::NAME))]
    pub async fn create(&mut self, params: Attributes) -> Result<&Resource<C>> {
        let Some(parent_id) = self.parent_id()? else {
            warn!("Parent has no id, refusing to create child");
            return Err(Error::Precedence { parent: P::NAME });
        };

        let mut attributes = params;
        attributes.insert(P::foreign_key(), Value::from(parent_id.as_str()));
        let created = self.client.create(attributes).await?;
        info!(id = ?created.id(), "Created member");
        self.register(created, Some(&parent_id))
    }

    /// Returns the member with `id`, fetching it only when it is not cached.
    ///
    /// A fetched child must reference the parent through its foreign key, otherwise
    /// [`Error::ForeignKeyMismatch`] is returned and nothing is cached. The check is
    /// skipped while the parent has no id.
    #[instrument(skip(self), fields(parent = P::NAME, child = C::NAME))]
    pub async fn retrieve(&mut self, id: &str) -> Result<&Resource<C>> {
        self.sync_member_ids();
        if let Some(index) = self.cached(id) {
            debug!("Cache hit");
            return Ok(&self.members[index]);
        }

        let parent_id = self.parent_id()?;
        let fetched = self.client.retrieve(id).await?;
        info!("Retrieved member");
        self.register(fetched, parent_id.as_deref())
    }

    /// Discards the cache and re-fetches every id embedded in the parent.
    ///
    /// Drafts are dropped. On failure the previous state is kept.
    #[instrument(skip(self), fields(parent = P::NAME, child = C::NAME))]
    pub async fn refresh(&mut self) -> Result<&mut Self> {
        let ids = self.embedded_ids()?;
        let mut member_ids = Vec::with_capacity(ids.len());
        let mut members = Vec::with_capacity(ids.len());

        for id in ids {
            if member_ids.contains(&id) {
                continue;
            }
            let member = self.client.retrieve(&id).await?;
            member_ids.push(id);
            members.push(member);
        }

        info!(count = members.len(), "Refreshed members");
        self.member_ids = member_ids;
        self.members = members;
        Ok(self)
    }

    /// Saves the member at `index` with the child client.
    ///
    /// Drafts cascade through their parent link; a newly persisted id is added to the
    /// member ids.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub async fn save(&mut self, index: usize) -> Result<&Resource<C>> {
        self.members[index].save(&self.client).await?;
        self.sync_member_ids();
        Ok(&self.members[index])
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource<C>> {
        self.members.iter()
    }

    /// Ids known to belong to the parent, in order.
    pub fn member_ids(&self) -> &[String] {
        &self.member_ids
    }

    pub fn members(&self) -> &[Resource<C>] {
        &self.members
    }

    /// Mutable access to a member.
    ///
    /// A draft saved through this reference directly is picked up as a member id by the
    /// next [`retrieve`](Self::retrieve) or [`save`](Self::save).
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Resource<C>> {
        self.members.get_mut(index)
    }

    pub fn parent_name(&self) -> &'static str {
        P::NAME
    }

    pub fn foreign_key(&self) -> String {
        P::foreign_key()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.members.iter().position(|member| member.id() == Some(id))
    }

    /// Index of a cached member, only when `id` is a known member id.
    fn cached(&self, id: &str) -> Option<usize> {
        if !self.member_ids.iter().any(|known| known == id) {
            return None;
        }
        self.position(id)
    }

    /// Adds the ids of members persisted outside the collection's own operations.
    fn sync_member_ids(&mut self) {
        for member in &self.members {
            if let Some(id) = member.id() {
                if !self.member_ids.iter().any(|known| known == id) {
                    debug!(%id, "Adopting saved member id");
                    self.member_ids.push(id.to_string());
                }
            }
        }
    }

    fn parent(&self) -> Result<SharedResource<P>> {
        self.parent.upgrade().ok_or(Error::ParentReleased(P::NAME))
    }

    fn parent_id(&self) -> Result<Option<String>> {
        let parent = self.parent()?;
        let guard = parent.read().map_err(|_| Error::LockPoisoned(P::NAME))?;
        Ok(guard.id().map(str::to_owned))
    }

    fn embedded_ids(&self) -> Result<Vec<String>> {
        let parent = self.parent()?;
        let guard = parent.read().map_err(|_| Error::LockPoisoned(P::NAME))?;
        Ok(guard.get_ids(&P::embedded_ids_key()))
    }

    /// Caches a persisted child after checking its foreign key.
    ///
    /// A child whose id is already cached replaces that member in place.
    fn register(&mut self, member: Resource<C>, parent_id: Option<&str>) -> Result<&Resource<C>> {
        let Some(id) = member.id().map(str::to_owned) else {
            return Err(TransportError::Decode(format!("{} response has no id", C::NAME)).into());
        };

        if let Some(parent_id) = parent_id {
            let foreign_key = P::foreign_key();
            let found = member.get_str(&foreign_key);
            if found != Some(parent_id) {
                warn!(%id, ?found, "Member belongs to a different parent");
                return Err(Error::ForeignKeyMismatch {
                    parent: P::NAME,
                    parent_id: parent_id.to_string(),
                    child: C::NAME,
                    child_id: id,
                    foreign_key,
                    found: found.map(str::to_owned),
                });
            }
        }

        let index = match self.position(&id) {
            Some(index) => {
                debug!(%id, "Replacing cached member");
                self.members[index] = member;
                index
            }
            None => {
                self.members.push(member);
                self.members.len() - 1
            }
        };
        if !self.member_ids.contains(&id) {
            self.member_ids.push(id);
        }
        Ok(&self.members[index])
    }
}

impl<'a, P: HasMany<C>, C: ResourceEntity> IntoIterator for &'a Association<P, C> {
    type Item = &'a Resource<C>;
    type IntoIter = std::slice::Iter<'a, Resource<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<P: HasMany<C>, C: ResourceEntity> fmt::Debug for Association<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Association")
            .field("parent", &P::NAME)
            .field("child", &C::NAME)
            .field("member_ids", &self.member_ids)
            .field("members", &self.members)
            .finish()
    }
}

/// Owner link attached to drafts built through an [`Association`].
///
/// Persists the parent on demand so that the child create can reference it.
pub struct ParentLink<P: ResourceEntity> {
    parent: Weak<RwLock<Resource<P>>>,
    client: ResourceClient<P>,
    foreign_key: String,
}

#[async_trait]
impl<P: ResourceEntity> OwnerLink for ParentLink<P> {
    fn foreign_key(&self) -> &str {
        &self.foreign_key
    }

    #[instrument(skip(self), fields(parent = P::NAME))]
    async fn ensure_persisted(&self) -> Result<String> {
        let shared = self.parent.upgrade().ok_or(Error::ParentReleased(P::NAME))?;

        // Locks are never held across an await.
        let mut draft = {
            let guard = shared.read().map_err(|_| Error::LockPoisoned(P::NAME))?;
            if let Some(id) = guard.id() {
                return Ok(id.to_string());
            }
            guard.clone()
        };

        info!("Saving parent before child");
        draft.save(&self.client).await?;

        let mut guard = shared.write().map_err(|_| Error::LockPoisoned(P::NAME))?;
        if let Some(id) = guard.id() {
            return Ok(id.to_string());
        }
        let id = draft
            .id()
            .map(str::to_owned)
            .ok_or_else(|| TransportError::Decode(format!("saved {} has no id", P::NAME)))?;
        *guard = draft;
        Ok(id)
    }
}
