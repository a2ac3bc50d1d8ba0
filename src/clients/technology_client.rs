use crate::error::PortfolioError;
use crate::model::Technology;
use async_trait::async_trait;
use resource_store::{ActorClient, ResourceClient, StoreError};

/// Client for interacting with the Technology actor.
#[derive(Clone)]
pub struct TechnologyClient {
    inner: ResourceClient<Technology>,
}

impl TechnologyClient {
    pub fn new(inner: ResourceClient<Technology>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Technology> for TechnologyClient {
    type Error = PortfolioError;

    fn inner(&self) -> &ResourceClient<Technology> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PortfolioError::from(e)
    }
}
