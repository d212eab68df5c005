//! # Person Client
//!
//! Wraps a `ResourceClient<Person>` and exposes the person's question sets as an
//! [`Association`].
use crate::association::Association;
use crate::clients::api_client::ApiClient;
use crate::error::Result;
use crate::framework::{Resource, ResourceClient, SharedResource};
use crate::model::{Person, PersonParams, QuestionSet};
use tracing::{debug, instrument};

/// Client for people and their question sets.
#[derive(Clone)]
pub struct PersonClient {
    inner: ResourceClient<Person>,
    question_sets: ResourceClient<QuestionSet>,
}

impl PersonClient {
    pub fn new(inner: ResourceClient<Person>, question_sets: ResourceClient<QuestionSet>) -> Self {
        Self {
            inner,
            question_sets,
        }
    }

    #[instrument(skip(self, params))]
    pub async fn create_person(&self, params: PersonParams) -> Result<Resource<Person>> {
        debug!("Sending request");
        self.inner.create(params.into_attributes()?).await
    }

    /// The question sets belonging to `person`, fetched from the ids it embeds.
    #[instrument(skip_all)]
    pub async fn question_sets(
        &self,
        person: &SharedResource<Person>,
    ) -> Result<Association<Person, QuestionSet>> {
        Association::load(person, self.inner.clone(), self.question_sets.clone()).await
    }
}

impl ApiClient<Person> for PersonClient {
    fn inner(&self) -> &ResourceClient<Person> {
        &self.inner
    }
}
