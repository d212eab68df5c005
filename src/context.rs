//! # Client Context
//!
//! [`BlockScore`] bundles a validated [`Config`] with the [`Transport`] every request goes
//! through. It is built once and handed out by reference or clone; nothing is stored in
//! process-wide state, so several contexts with different keys can coexist.
//!
//! ```rust
//! use blockscore::{BlockScore, Config};
//!
//! let live = BlockScore::new(Config::new("sk_live_123")).unwrap();
//! let test = BlockScore::new(Config::new("sk_test_456")).unwrap();
//! assert_ne!(live.config().api_key, test.config().api_key);
//! ```

use crate::association::{Association, HasMany};
use crate::clients::{
    CompanyClient, PersonClient, QuestionSetClient, VerificationClient, WatchlistCandidateClient,
    WatchlistClient,
};
use crate::config::Config;
use crate::error::Result;
use crate::framework::{HttpTransport, ResourceClient, ResourceEntity, SharedResource, Transport};
use std::sync::Arc;
use tracing::info;

/// Entry point to the API.
#[derive(Clone)]
pub struct BlockScore {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
}

impl BlockScore {
    /// Validates `config` and builds an HTTP transport for it.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        info!(base_url = %config.base_url, "BlockScore client ready");
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        })
    }

    /// Builds a context from `BLOCKSCORE_API_KEY` and `BLOCKSCORE_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Uses a caller-supplied transport, e.g. a
    /// [`MockTransport`](crate::framework::mock::MockTransport) in tests.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generic client for any resource kind.
    pub fn resource<K: ResourceEntity>(&self) -> ResourceClient<K> {
        ResourceClient::new(self.transport.clone())
    }

    pub fn people(&self) -> PersonClient {
        PersonClient::new(self.resource(), self.resource())
    }

    pub fn companies(&self) -> CompanyClient {
        CompanyClient::new(self.resource())
    }

    pub fn verifications(&self) -> VerificationClient {
        VerificationClient::new(self.resource())
    }

    pub fn question_sets(&self) -> QuestionSetClient {
        QuestionSetClient::new(self.resource())
    }

    pub fn watchlists(&self) -> WatchlistClient {
        WatchlistClient::new(self.resource())
    }

    pub fn watchlist_candidates(&self) -> WatchlistCandidateClient {
        WatchlistCandidateClient::new(self.resource())
    }

    /// Loads the `C` children of `parent`.
    pub async fn association<P, C>(&self, parent: &SharedResource<P>) -> Result<Association<P, C>>
    where
        P: HasMany<C>,
        C: ResourceEntity,
    {
        Association::load(parent, self.resource(), self.resource()).await
    }
}
