use crate::clients::api_client::ApiClient;
use crate::framework::ResourceClient;
use crate::model::Verification;

/// Client for one-shot verifications. Only the standard operations apply.
#[derive(Clone)]
pub struct VerificationClient {
    inner: ResourceClient<Verification>,
}

impl VerificationClient {
    pub fn new(inner: ResourceClient<Verification>) -> Self {
        Self { inner }
    }
}

impl ApiClient<Verification> for VerificationClient {
    fn inner(&self) -> &ResourceClient<Verification> {
        &self.inner
    }
}
