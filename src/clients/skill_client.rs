use crate::clients::check_owner;
use crate::error::{FieldErrors, PortfolioError};
use crate::model::{Profile, Skill, SkillCreate, SkillId, SkillUpdate};
use async_trait::async_trait;
use resource_store::{ActorClient, ResourceClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Skill actor.
#[derive(Clone)]
pub struct SkillClient {
    inner: ResourceClient<Skill>,
    profiles: ResourceClient<Profile>,
}

impl SkillClient {
    pub fn new(inner: ResourceClient<Skill>, profiles: ResourceClient<Profile>) -> Self {
        Self { inner, profiles }
    }
}

#[async_trait]
impl ActorClient<Skill> for SkillClient {
    type Error = PortfolioError;

    fn inner(&self) -> &ResourceClient<Skill> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PortfolioError::from(e)
    }

    #[instrument(skip(self))]
    async fn create(&self, params: SkillCreate) -> Result<Skill, PortfolioError> {
        let mut errors = FieldErrors::new();
        check_owner(&self.profiles, params.user, &mut errors).await?;
        errors.into_result()?;

        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: SkillId, update: SkillUpdate) -> Result<Skill, PortfolioError> {
        if let Some(owner) = update.user {
            let mut errors = FieldErrors::new();
            check_owner(&self.profiles, owner, &mut errors).await?;
            errors.into_result()?;
        }

        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
