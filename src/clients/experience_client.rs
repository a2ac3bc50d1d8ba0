use crate::clients::check_owner;
use crate::error::{FieldErrors, PortfolioError};
use crate::model::{Experience, ExperienceCreate, ExperienceId, ExperienceUpdate, Profile};
use async_trait::async_trait;
use resource_store::{ActorClient, ResourceClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Experience actor.
#[derive(Clone)]
pub struct ExperienceClient {
    inner: ResourceClient<Experience>,
    profiles: ResourceClient<Profile>,
}

impl ExperienceClient {
    pub fn new(inner: ResourceClient<Experience>, profiles: ResourceClient<Profile>) -> Self {
        Self { inner, profiles }
    }
}

#[async_trait]
impl ActorClient<Experience> for ExperienceClient {
    type Error = PortfolioError;

    fn inner(&self) -> &ResourceClient<Experience> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PortfolioError::from(e)
    }

    #[instrument(skip(self))]
    async fn create(&self, params: ExperienceCreate) -> Result<Experience, PortfolioError> {
        let mut errors = FieldErrors::new();
        check_owner(&self.profiles, params.user, &mut errors).await?;
        errors.into_result()?;

        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        id: ExperienceId,
        update: ExperienceUpdate,
    ) -> Result<Experience, PortfolioError> {
        if let Some(owner) = update.user {
            let mut errors = FieldErrors::new();
            check_owner(&self.profiles, owner, &mut errors).await?;
            errors.into_result()?;
        }

        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
