//! Skill actor. Skill names are unique per owning profile.

use crate::error::{FieldErrors, RecordError, NON_FIELD_ERRORS};
use crate::model::{OwnedBy, Skill, SkillCreate, SkillId, SkillUpdate};
use async_trait::async_trait;
use resource_store::{NoAction, Record, ResourceActor, ResourceClient};
use std::cmp::Ordering;

/// Creates a new Skill actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Skill>, ResourceClient<Skill>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl Record for Skill {
    type Id = SkillId;
    type Create = SkillCreate;
    type Update = SkillUpdate;
    type Filter = OwnedBy;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ();
    type Error = RecordError;

    fn from_create_params(id: SkillId, params: SkillCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            user: params.user,
            name: params.name,
            proficiency_level: params.proficiency_level,
            category: params.category,
            certification_url: params.certification_url,
        })
    }

    fn check_unique(&self, other: &Self) -> Result<(), Self::Error> {
        if self.user == other.user && self.name == other.name {
            return Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                "The fields user, name must make a unique set.",
            )
            .into());
        }
        Ok(())
    }

    fn matches(&self, filter: &OwnedBy) -> bool {
        self.user == filter.0
    }

    fn ordering(&self, other: &Self) -> Ordering {
        self.display_cmp(other)
    }

    async fn on_update(&mut self, update: SkillUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(user) = update.user {
            self.user = user;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(level) = update.proficiency_level {
            self.proficiency_level = level;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(certification_url) = update.certification_url {
            self.certification_url = certification_url;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
