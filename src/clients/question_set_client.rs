//! # Question Set Client
//!
//! Question sets are normally reached through a person
//! ([`PersonClient::question_sets`](crate::clients::PersonClient::question_sets)); this
//! client adds scoring.
use crate::clients::api_client::ApiClient;
use crate::error::Result;
use crate::framework::{serialize_params, Resource, ResourceClient};
use crate::model::{Answer, QuestionSet};
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Serialize)]
struct ScoreParams<'a> {
    answers: &'a [Answer],
}

/// Client for question sets.
#[derive(Clone)]
pub struct QuestionSetClient {
    inner: ResourceClient<QuestionSet>,
}

impl QuestionSetClient {
    pub fn new(inner: ResourceClient<QuestionSet>) -> Self {
        Self { inner }
    }

    /// Submits answers and returns the scored question set.
    #[instrument(skip(self, answers))]
    pub async fn score(&self, id: &str, answers: &[Answer]) -> Result<Resource<QuestionSet>> {
        debug!(answers = answers.len(), "Scoring question set");
        let params = serialize_params(&ScoreParams { answers })?;
        let json = self.inner.post_action(id, "score", params).await?;
        Ok(Resource::from_json(json)?)
    }
}

impl ApiClient<QuestionSet> for QuestionSetClient {
    fn inner(&self) -> &ResourceClient<QuestionSet> {
        &self.inner
    }
}
