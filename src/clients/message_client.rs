use crate::error::PortfolioError;
use crate::model::ContactMessage;
use async_trait::async_trait;
use resource_store::{ActorClient, ResourceClient, StoreError};

/// Client for interacting with the ContactMessage actor.
#[derive(Clone)]
pub struct MessageClient {
    inner: ResourceClient<ContactMessage>,
}

impl MessageClient {
    pub fn new(inner: ResourceClient<ContactMessage>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<ContactMessage> for MessageClient {
    type Error = PortfolioError;

    fn inner(&self) -> &ResourceClient<ContactMessage> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PortfolioError::from(e)
    }
}
