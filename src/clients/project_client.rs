//! # Project Client
//!
//! Checks that the owning profile and every linked technology exist before a project is
//! written. The checks and the write are separate requests to separate actors.
use crate::clients::{check_owner, missing_pk};
use crate::error::{FieldErrors, PortfolioError};
use crate::model::{
    Profile, Project, ProjectCreate, ProjectId, ProjectUpdate, Technology, TechnologyId,
};
use async_trait::async_trait;
use resource_store::{ActorClient, ResourceClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Project actor.
#[derive(Clone)]
pub struct ProjectClient {
    inner: ResourceClient<Project>,
    profiles: ResourceClient<Profile>,
    technologies: ResourceClient<Technology>,
}

impl ProjectClient {
    pub fn new(
        inner: ResourceClient<Project>,
        profiles: ResourceClient<Profile>,
        technologies: ResourceClient<Technology>,
    ) -> Self {
        Self {
            inner,
            profiles,
            technologies,
        }
    }

    async fn check_technologies(
        &self,
        technologies: &[TechnologyId],
        errors: &mut FieldErrors,
    ) -> Result<(), PortfolioError> {
        for technology in technologies {
            if self.technologies.get(*technology).await?.is_none() {
                errors.add("technologies", missing_pk(technology.0));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ActorClient<Project> for ProjectClient {
    type Error = PortfolioError;

    fn inner(&self) -> &ResourceClient<Project> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PortfolioError::from(e)
    }

    #[instrument(skip(self))]
    async fn create(&self, params: ProjectCreate) -> Result<Project, PortfolioError> {
        let mut errors = FieldErrors::new();
        check_owner(&self.profiles, params.user, &mut errors).await?;
        self.check_technologies(&params.technologies, &mut errors).await?;
        errors.into_result()?;

        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: ProjectId, update: ProjectUpdate) -> Result<Project, PortfolioError> {
        let mut errors = FieldErrors::new();
        if let Some(owner) = update.user {
            check_owner(&self.profiles, owner, &mut errors).await?;
        }
        if let Some(technologies) = &update.technologies {
            self.check_technologies(technologies, &mut errors).await?;
        }
        errors.into_result()?;

        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
