//! Profile actor.
//!
//! Owns the profiles. A profile is unique per account, and deleting one removes every
//! project, skill and experience it owns through the clients in [`ProfileContext`].

use crate::error::{FieldErrors, RecordError};
use crate::model::{
    Experience, OwnedBy, Profile, ProfileCreate, ProfileFilter, ProfileId, ProfileUpdate, Project,
    ProjectFilter, Skill,
};
use async_trait::async_trait;
use resource_store::{NoAction, Record, ResourceActor, ResourceClient};
use tracing::info;

/// Clients of the collections a profile owns.
#[derive(Clone)]
pub struct ProfileContext {
    pub projects: ResourceClient<Project>,
    pub skills: ResourceClient<Skill>,
    pub experiences: ResourceClient<Experience>,
}

/// Creates a new Profile actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Profile>, ResourceClient<Profile>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl Record for Profile {
    type Id = ProfileId;
    type Create = ProfileCreate;
    type Update = ProfileUpdate;
    type Filter = ProfileFilter;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ProfileContext;
    type Error = RecordError;

    fn from_create_params(id: ProfileId, params: ProfileCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            user: params.user,
            full_name: params.full_name,
            bio_summary: params.bio_summary,
            resume_link: params.resume_link,
            profile_picture: params.profile_picture,
            profile_picture_url: params.profile_picture_url,
            location: params.location,
        })
    }

    fn check_unique(&self, other: &Self) -> Result<(), Self::Error> {
        if self.user == other.user {
            return Err(FieldErrors::single("user", "user profile with this user already exists.").into());
        }
        Ok(())
    }

    fn matches(&self, filter: &ProfileFilter) -> bool {
        match filter {
            ProfileFilter::Account(account) => self.user == *account,
        }
    }

    async fn on_update(&mut self, update: ProfileUpdate, _ctx: &ProfileContext) -> Result<(), Self::Error> {
        if let Some(user) = update.user {
            self.user = user;
        }
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(bio_summary) = update.bio_summary {
            self.bio_summary = bio_summary;
        }
        if let Some(resume_link) = update.resume_link {
            self.resume_link = resume_link;
        }
        if let Some(profile_picture) = update.profile_picture {
            self.profile_picture = profile_picture;
        }
        if let Some(profile_picture_url) = update.profile_picture_url {
            self.profile_picture_url = profile_picture_url;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        Ok(())
    }

    async fn on_delete(&self, ctx: &ProfileContext) -> Result<(), Self::Error> {
        let owner = self.id;
        let projects = ctx
            .projects
            .delete_where(ProjectFilter::Owner(owner))
            .await
            .map_err(|source| RecordError::Cascade {
                resource: "projects",
                source,
            })?;
        let skills = ctx
            .skills
            .delete_where(OwnedBy(owner))
            .await
            .map_err(|source| RecordError::Cascade {
                resource: "skills",
                source,
            })?;
        let experiences = ctx
            .experiences
            .delete_where(OwnedBy(owner))
            .await
            .map_err(|source| RecordError::Cascade {
                resource: "experience",
                source,
            })?;
        info!(%owner, projects, skills, experiences, "Cascaded profile delete");
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &ProfileContext) -> Result<(), Self::Error> {
        match action {}
    }
}
