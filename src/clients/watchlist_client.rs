//! # Watchlist Clients
//!
//! Candidates are stored resources with full CRUD; watchlist searches are stateless and
//! run against a stored candidate.
use crate::clients::api_client::ApiClient;
use crate::error::Result;
use crate::framework::resource::{decode_many, unwrap_list};
use crate::framework::{Attributes, Resource, ResourceClient, Value};
use crate::model::{CandidateParams, Watchlist, WatchlistCandidate};
use tracing::{debug, info, instrument};

/// Client for watchlist searches.
#[derive(Clone)]
pub struct WatchlistClient {
    inner: ResourceClient<Watchlist>,
}

impl WatchlistClient {
    pub fn new(inner: ResourceClient<Watchlist>) -> Self {
        Self { inner }
    }

    /// Screens a candidate. `match_type` narrows the search to `person` or `company`.
    ///
    /// The result is not stored; its `matches()` are the hit list and `count()` their number.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        candidate_id: &str,
        match_type: Option<&str>,
    ) -> Result<Resource<Watchlist>> {
        let mut params = Attributes::new();
        params.insert("watchlist_candidate_id".into(), Value::from(candidate_id));
        if let Some(match_type) = match_type {
            params.insert("match_type".into(), Value::from(match_type));
        }

        let json = self.inner.post_collection(params).await?;
        let result = Resource::<Watchlist>::from_json(json)?;
        info!(matches = result.count(), "Watchlist search finished");
        Ok(result)
    }
}

/// Client for watchlist candidates.
#[derive(Clone)]
pub struct WatchlistCandidateClient {
    inner: ResourceClient<WatchlistCandidate>,
}

impl WatchlistCandidateClient {
    pub fn new(inner: ResourceClient<WatchlistCandidate>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn create_candidate(
        &self,
        params: CandidateParams,
    ) -> Result<Resource<WatchlistCandidate>> {
        debug!("Sending request");
        self.inner.create(params.into_attributes()?).await
    }

    /// Edits the candidate. The API takes candidate edits as `PUT`.
    #[instrument(skip(self, params))]
    pub async fn update(
        &self,
        id: &str,
        params: Attributes,
    ) -> Result<Resource<WatchlistCandidate>> {
        self.inner.replace(id, params).await
    }

    /// Deletes the candidate; the API returns it with `deleted: true`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Resource<WatchlistCandidate>> {
        self.inner.delete(id).await
    }

    /// Earlier revisions of the candidate, newest first.
    #[instrument(skip(self))]
    pub async fn history(&self, id: &str) -> Result<Vec<Resource<WatchlistCandidate>>> {
        let json = self.inner.get_action(id, "history").await?;
        Ok(decode_many(json)?)
    }

    /// Watchlist hits recorded for the candidate.
    #[instrument(skip(self))]
    pub async fn hits(&self, id: &str) -> Result<Vec<Value>> {
        let json = self.inner.get_action(id, "hits").await?;
        let hits = unwrap_list(json, "hits")?;
        Ok(hits.into_iter().map(Value::from).collect())
    }
}

impl ApiClient<WatchlistCandidate> for WatchlistCandidateClient {
    fn inner(&self) -> &ResourceClient<WatchlistCandidate> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_search_sends_candidate_and_match_type() {
        let mock = MockTransport::new();
        mock.expect_post("/watchlists").return_ok(json!({
            "count": 1,
            "matches": [{ "watchlist_name": "us_ofac", "confidence": 0.9 }]
        }));
        let client = WatchlistClient::new(ResourceClient::new(Arc::new(mock.clone())));

        let result = client.search("wc_1", Some("person")).await.unwrap();
        assert_eq!(result.count(), 1);
        assert_eq!(result.matches()[0].as_map().unwrap()["watchlist_name"].as_str(), Some("us_ofac"));

        let body = mock.requests()[0].body.clone().unwrap();
        assert_eq!(body["watchlist_candidate_id"].as_str(), Some("wc_1"));
        assert_eq!(body["match_type"].as_str(), Some("person"));
    }

    #[tokio::test]
    async fn test_candidate_history_and_hits() {
        let mock = MockTransport::new();
        mock.expect_get("/watchlist_candidates/wc_1/history")
            .return_ok(json!([{ "id": "wc_1", "note": "v2" }, { "id": "wc_1", "note": "v1" }]));
        mock.expect_get("/watchlist_candidates/wc_1/hits")
            .return_ok(json!({ "object": "list", "data": [{ "matching_info": ["name"] }] }));
        let client = WatchlistCandidateClient::new(ResourceClient::new(Arc::new(mock.clone())));

        let history = client.history("wc_1").await.unwrap();
        assert_eq!(history[0].note(), Some("v2"));

        let hits = client.hits("wc_1").await.unwrap();
        assert_eq!(hits.len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_candidate_edit_uses_put() {
        let mock = MockTransport::new();
        mock.expect_put("/watchlist_candidates/wc_1")
            .return_ok(json!({ "id": "wc_1", "note": "cleared" }));
        let client = WatchlistCandidateClient::new(ResourceClient::new(Arc::new(mock.clone())));

        let mut params = Attributes::new();
        params.insert("note".into(), Value::from("cleared"));
        let edited = client.update("wc_1", params).await.unwrap();

        assert_eq!(edited.note(), Some("cleared"));
        let request = &mock.requests()[0];
        assert_eq!(request.method, crate::framework::Method::Put);
        assert_eq!(request.body.as_ref().unwrap()["note"].as_str(), Some("cleared"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_candidate_delete_echoes_object() {
        let mock = MockTransport::new();
        mock.expect_delete("/watchlist_candidates/wc_1")
            .return_ok(json!({ "id": "wc_1", "deleted": true }));
        let client = WatchlistCandidateClient::new(ResourceClient::new(Arc::new(mock.clone())));

        let deleted = client.delete("wc_1").await.unwrap();
        assert_eq!(deleted.get_bool("deleted"), Some(true));
    }
}
