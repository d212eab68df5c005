//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. You queue up the
//! requests you expect, in order, together with the response each one should get.
//! Every request that arrives is recorded so tests can assert on paths, bodies and the
//! number of round trips.
//!
//! ## When to use the mock vs the real API
//!
//! | Feature | MockTransport | HttpTransport |
//! |---------|---------------|---------------|
//! | **Speed** | Instant | Network bound |
//! | **Determinism** | 100% deterministic | Depends on remote data |
//! | **Error injection** | Easy (`return_status`, `return_err`) | Hard |
//! | **Use case** | Collection caching, save ordering, error mapping | Smoke tests against a sandbox key |
//!
//! ## Example
//!
//! ```rust
//! use blockscore::framework::mock::MockTransport;
//! use blockscore::{BlockScore, Config};
//! use blockscore::clients::ApiClient;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/people/p_1")
//!         .return_ok(json!({ "id": "p_1", "name_first": "John" }));
//!
//!     let client = BlockScore::with_transport(Config::new("sk_test"), Arc::new(mock.clone())).unwrap();
//!     let person = client.people().retrieve("p_1").await.unwrap();
//!     assert_eq!(person.first_name(), Some("John"));
//!
//!     assert_eq!(mock.request_count(), 1);
//!     mock.verify(); // every expectation was consumed
//! }
//! ```
//!
//! ## Failure scenarios
//!
//! ```rust
//! use blockscore::framework::mock::MockTransport;
//! use blockscore::{BlockScore, Config, Error, TransportError};
//! use blockscore::clients::ApiClient;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/people/p_1")
//!         .return_err(TransportError::Timeout(Duration::from_secs(30)));
//!
//!     let client = BlockScore::with_transport(Config::new("sk_test"), Arc::new(mock.clone())).unwrap();
//!     let result = client.people().retrieve("p_1").await;
//!     assert!(matches!(result, Err(Error::Transport(TransportError::Timeout(_)))));
//! }
//! ```

use crate::error::TransportError;
use crate::framework::transport::{Method, Response, Transport};
use crate::framework::value::Attributes;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to hand back.
struct Expectation {
    method: Method,
    path: String,
    response: Result<Response, TransportError>,
}

/// A request as the mock received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Attributes>,
}

/// In-memory transport with ordered expectations.
///
/// Cloning is cheap and clones share state, so a test can keep one handle for
/// assertions and give another to the client under test.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with `method` on `path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_patch(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Patch, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let pending: Vec<String> = exps.iter().map(|e| format!("{} {}", e.method, e.path)).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                exps.len(),
                pending
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Attributes>,
    ) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });

        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.method == method && exp.path == path => exp.response,
            Some(exp) => panic!(
                "Unexpected request {method} {path}; expected {} {}",
                exp.method, exp.path
            ),
            None => panic!("Unexpected request {method} {path}; no expectations left"),
        }
    }
}

/// Builder for the response to an expected request.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Responds with `200 OK` and `body`.
    pub fn return_ok(self, body: serde_json::Value) {
        self.return_status(200, body);
    }

    /// Responds with an arbitrary status and body.
    pub fn return_status(self, status: u16, body: serde_json::Value) {
        self.push(Ok(Response { status, body }));
    }

    /// Fails the round trip itself.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Response, TransportError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            method: self.method,
            path: self.path,
            response,
        });
    }
}
