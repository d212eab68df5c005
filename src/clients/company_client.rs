use crate::clients::api_client::ApiClient;
use crate::error::Result;
use crate::framework::{Resource, ResourceClient};
use crate::model::{Company, CompanyParams};
use tracing::{debug, instrument};

/// Client for company verifications.
#[derive(Clone)]
pub struct CompanyClient {
    inner: ResourceClient<Company>,
}

impl CompanyClient {
    pub fn new(inner: ResourceClient<Company>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn create_company(&self, params: CompanyParams) -> Result<Resource<Company>> {
        debug!("Sending request");
        self.inner.create(params.into_attributes()?).await
    }
}

impl ApiClient<Company> for CompanyClient {
    fn inner(&self) -> &ResourceClient<Company> {
        &self.inner
    }
}
