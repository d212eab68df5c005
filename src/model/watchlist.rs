use crate::error::Result;
use crate::framework::{serialize_params, Attributes, Resource, ResourceEntity, Value};
use serde::Serialize;

/// Result of screening a candidate against global watchlists.
///
/// Searches are not stored; `POST /watchlists` returns the hits directly.
pub struct Watchlist;

impl ResourceEntity for Watchlist {
    const NAME: &'static str = "watchlist";
    const PATH: &'static str = "/watchlists";
}

/// A person or company screened against watchlists.
pub struct WatchlistCandidate;

impl ResourceEntity for WatchlistCandidate {
    const NAME: &'static str = "watchlist_candidate";
    const PATH: &'static str = "/watchlist_candidates";
}

/// Payload for creating a watchlist candidate. Every field is optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_middle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CandidateParams {
    pub fn into_attributes(self) -> Result<Attributes> {
        serialize_params(&self)
    }
}

impl Resource<Watchlist> {
    pub fn matches(&self) -> &[Value] {
        self.get_list("matches")
    }

    pub fn count(&self) -> i64 {
        self.get_i64("count").unwrap_or(self.matches().len() as i64)
    }

    pub fn searched_lists(&self) -> Vec<String> {
        self.get_ids("searched_lists")
    }
}

impl Resource<WatchlistCandidate> {
    pub fn first_name(&self) -> Option<&str> {
        self.get_str("name_first")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.get_str("name_last")
    }

    pub fn note(&self) -> Option<&str> {
        self.get_str("note")
    }
}
