//! Technology actor.
//!
//! Technology names are globally unique. Deleting a technology unlinks it from every
//! project that references it, leaving the projects in place.

use crate::error::{FieldErrors, RecordError};
use crate::model::{
    Project, ProjectAction, ProjectFilter, Technology, TechnologyCreate, TechnologyId,
    TechnologyUpdate,
};
use async_trait::async_trait;
use resource_store::{NoAction, NoFilter, Record, ResourceActor, ResourceClient, StoreError};
use tracing::info;

/// Creates a new Technology actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Technology>, ResourceClient<Technology>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl Record for Technology {
    type Id = TechnologyId;
    type Create = TechnologyCreate;
    type Update = TechnologyUpdate;
    type Filter = NoFilter;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ResourceClient<Project>;
    type Error = RecordError;

    fn from_create_params(id: TechnologyId, params: TechnologyCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: params.name,
        })
    }

    fn check_unique(&self, other: &Self) -> Result<(), Self::Error> {
        if self.name == other.name {
            return Err(FieldErrors::single("name", "technology with this name already exists.").into());
        }
        Ok(())
    }

    async fn on_update(&mut self, update: TechnologyUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn on_delete(&self, projects: &Self::Context) -> Result<(), Self::Error> {
        let cascade = |source| RecordError::Cascade {
            resource: "projects",
            source,
        };
        let linked = projects
            .list(Some(ProjectFilter::UsesTechnology(self.id)))
            .await
            .map_err(cascade)?;
        for project in &linked {
            // A project deleted since the listing has nothing left to detach.
            match projects
                .perform_action(project.id, ProjectAction::DetachTechnology(self.id))
                .await
            {
                Ok(_) | Err(StoreError::NotFound(_)) => {}
                Err(e) => return Err(cascade(e)),
            }
        }
        info!(technology = %self.id, projects = linked.len(), "Detached technology");
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &Self::Context) -> Result<(), Self::Error> {
        match action {}
    }
}
