use crate::model::{ExperienceId, ProfileId};
use chrono::NaiveDate;

/// A position held, owned by a profile. Lists most recent start date first.
#[derive(Debug, Clone, PartialEq)]
pub struct Experience {
    pub id: ExperienceId,
    pub user: ProfileId,
    pub job_title: String,
    pub company_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub responsibilities: String,
    pub is_current: bool,
}

#[derive(Debug, Clone)]
pub struct ExperienceCreate {
    pub user: ProfileId,
    pub job_title: String,
    pub company_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub responsibilities: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ExperienceUpdate {
    pub user: Option<ProfileId>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub responsibilities: Option<String>,
    pub is_current: Option<bool>,
}
