//! # Errors
//!
//! Every fallible operation in the crate returns [`Result<T>`]. The taxonomy is small on
//! purpose so callers can match on it:
//!
//! - [`Error::Configuration`] - bad or missing credentials, raised before any request.
//! - [`Error::InvalidParams`] - typed parameters that do not serialize to a JSON object.
//! - [`Error::Transport`] - anything that went wrong on the wire, see [`TransportError`].
//! - [`Error::Precedence`] - a child was created under a parent that has no id yet.
//! - [`Error::ForeignKeyMismatch`] - a fetched child belongs to a different parent.
//!
//! Non-2xx responses are turned into [`TransportError::Status`] by [`classify`].

mod classify;

pub use classify::classify;

use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing API key or otherwise unusable configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Typed request parameters could not be turned into attributes.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Network failure, non-2xx status, or malformed response body.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A child create was attempted while the owning parent has no id.
    #[error("create {parent} first: it has not been persisted")]
    Precedence { parent: &'static str },

    /// A child's foreign key does not reference the owning parent.
    #[error("none belonging to {parent} {parent_id}: {child} {child_id} has {foreign_key} = {found:?}")]
    ForeignKeyMismatch {
        parent: &'static str,
        parent_id: String,
        child: &'static str,
        child_id: String,
        foreign_key: String,
        found: Option<String>,
    },

    /// The parent an association was bound to has been dropped.
    #[error("{0} owning this collection has been dropped")]
    ParentReleased(&'static str),

    /// A shared resource lock was poisoned by a panicking writer.
    #[error("lock poisoned while accessing {0}")]
    LockPoisoned(&'static str),
}

impl Error {
    /// The HTTP status when the error came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// The classified API error kind when the error came from a non-2xx response.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Error::Transport(TransportError::Status { kind, .. }) => Some(*kind),
            _ => None,
        }
    }
}

/// Failures of a single HTTP round trip.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{kind} ({status}): {message}")]
    Status {
        status: u16,
        kind: ApiErrorKind,
        message: String,
    },

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Classification of non-2xx API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// 400: parameters were rejected.
    InvalidRequest,
    /// 401: the API key was not accepted.
    Authentication,
    /// 404: no such resource.
    NotFound,
    /// 429: too many requests.
    RateLimited,
    /// Any other non-2xx status.
    Api,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::InvalidRequest,
            401 => ApiErrorKind::Authentication,
            404 => ApiErrorKind::NotFound,
            429 => ApiErrorKind::RateLimited,
            _ => ApiErrorKind::Api,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::InvalidRequest => "invalid request",
            ApiErrorKind::Authentication => "authentication error",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::RateLimited => "rate limited",
            ApiErrorKind::Api => "api error",
        };
        f.write_str(name)
    }
}
