use crate::model::{ProfileId, ProjectId, TechnologyId};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// A portfolio project owned by a profile.
///
/// Projects list by `display_order` ascending, then newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub user: ProfileId,
    pub title: String,
    pub description: String,
    /// Linked technologies, sorted and without duplicates.
    pub technologies: Vec<TechnologyId>,
    pub live_link: String,
    pub github_link: String,
    /// Uploaded image, relative to the media root.
    pub image: Option<String>,
    pub display_order: u32,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Default listing order. Identical timestamps fall back to the newer id first.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.display_order
            .cmp(&other.display_order)
            .then_with(|| other.created_at.cmp(&self.created_at))
            .then_with(|| other.id.cmp(&self.id))
    }

    pub fn set_technologies(&mut self, technologies: Vec<TechnologyId>) {
        self.technologies = normalize_technologies(technologies);
    }
}

pub(crate) fn normalize_technologies(mut technologies: Vec<TechnologyId>) -> Vec<TechnologyId> {
    technologies.sort();
    technologies.dedup();
    technologies
}

#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub user: ProfileId,
    pub title: String,
    pub description: String,
    pub technologies: Vec<TechnologyId>,
    pub live_link: String,
    pub github_link: String,
    pub image: Option<String>,
    pub display_order: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub user: Option<ProfileId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<TechnologyId>>,
    pub live_link: Option<String>,
    pub github_link: Option<String>,
    pub image: Option<Option<String>>,
    pub display_order: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    Owner(ProfileId),
    UsesTechnology(TechnologyId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    /// Unlink a technology that is being deleted. Returns whether it was linked.
    DetachTechnology(TechnologyId),
}
