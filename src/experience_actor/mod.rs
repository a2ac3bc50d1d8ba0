//! Experience actor. Entries list most recent start date first.

use crate::error::RecordError;
use crate::model::{Experience, ExperienceCreate, ExperienceId, ExperienceUpdate, OwnedBy};
use async_trait::async_trait;
use resource_store::{NoAction, Record, ResourceActor, ResourceClient};
use std::cmp::Ordering;

/// Creates a new Experience actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Experience>, ResourceClient<Experience>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl Record for Experience {
    type Id = ExperienceId;
    type Create = ExperienceCreate;
    type Update = ExperienceUpdate;
    type Filter = OwnedBy;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ();
    type Error = RecordError;

    fn from_create_params(id: ExperienceId, params: ExperienceCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            user: params.user,
            job_title: params.job_title,
            company_name: params.company_name,
            start_date: params.start_date,
            end_date: params.end_date,
            responsibilities: params.responsibilities,
            is_current: params.is_current,
        })
    }

    fn matches(&self, filter: &OwnedBy) -> bool {
        self.user == filter.0
    }

    fn ordering(&self, other: &Self) -> Ordering {
        other.start_date.cmp(&self.start_date)
    }

    async fn on_update(&mut self, update: ExperienceUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(user) = update.user {
            self.user = user;
        }
        if let Some(job_title) = update.job_title {
            self.job_title = job_title;
        }
        if let Some(company_name) = update.company_name {
            self.company_name = company_name;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(responsibilities) = update.responsibilities {
            self.responsibilities = responsibilities;
        }
        if let Some(is_current) = update.is_current {
            self.is_current = is_current;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
