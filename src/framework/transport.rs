//! # Transport
//!
//! One authenticated HTTP round trip per call. The [`Transport`] trait is the seam
//! between resource logic and the network: production code uses [`HttpTransport`],
//! tests use [`MockTransport`](crate::framework::mock::MockTransport).
//!
//! Transports never retry. A timeout is reported as [`TransportError::Timeout`]
//! instead of hanging.

use crate::config::Config;
use crate::error::{Error, TransportError};
use crate::framework::value::Attributes;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("blockscore-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Status and decoded JSON body of a completed round trip.
///
/// Non-2xx responses are still `Ok` at this layer; see [`crate::error::classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Executes requests against the API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `body` (if any) as JSON to `path`, relative to the API host.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Attributes>,
    ) -> Result<Response, TransportError>;
}

/// reqwest-backed transport with basic auth and the versioned `Accept` header.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let accept = HeaderValue::from_str(&config.accept_header())
            .map_err(|e| Error::Configuration(format!("invalid API version: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, accept);

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: config.timeout(),
        })
    }

    fn send_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, body))]
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Attributes>,
    ) -> Result<Response, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.into(), &url)
            .basic_auth(&self.api_key, Some(""));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.send_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.send_error(e))?;
        debug!(status = status.as_u16(), bytes = text.len(), "Response received");

        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(json) => json,
                // Error pages are often HTML; keep the text so the status can be classified.
                Err(_) if !status.is_success() => serde_json::Value::String(text),
                Err(e) => return Err(TransportError::Decode(format!("{path}: {e}"))),
            }
        };

        Ok(Response {
            status: status.as_u16(),
            body,
        })
    }
}
