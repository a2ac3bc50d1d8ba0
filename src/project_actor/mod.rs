//! Project actor.

use crate::error::RecordError;
use crate::model::project::normalize_technologies;
use crate::model::{Project, ProjectAction, ProjectCreate, ProjectFilter, ProjectId, ProjectUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::{Record, ResourceActor, ResourceClient};
use std::cmp::Ordering;

/// Creates a new Project actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Project>, ResourceClient<Project>) {
    ResourceActor::new(buffer_size)
}

#[async_trait]
impl Record for Project {
    type Id = ProjectId;
    type Create = ProjectCreate;
    type Update = ProjectUpdate;
    type Filter = ProjectFilter;
    type Action = ProjectAction;
    type ActionResult = bool;
    type Context = ();
    type Error = RecordError;

    fn from_create_params(id: ProjectId, params: ProjectCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            user: params.user,
            title: params.title,
            description: params.description,
            technologies: normalize_technologies(params.technologies),
            live_link: params.live_link,
            github_link: params.github_link,
            image: params.image,
            display_order: params.display_order,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &ProjectFilter) -> bool {
        match filter {
            ProjectFilter::Owner(owner) => self.user == *owner,
            ProjectFilter::UsesTechnology(technology) => self.technologies.contains(technology),
        }
    }

    fn ordering(&self, other: &Self) -> Ordering {
        self.display_cmp(other)
    }

    async fn on_update(&mut self, update: ProjectUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(user) = update.user {
            self.user = user;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(technologies) = update.technologies {
            self.set_technologies(technologies);
        }
        if let Some(live_link) = update.live_link {
            self.live_link = live_link;
        }
        if let Some(github_link) = update.github_link {
            self.github_link = github_link;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(display_order) = update.display_order {
            self.display_order = display_order;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ProjectAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            ProjectAction::DetachTechnology(technology) => {
                let before = self.technologies.len();
                self.technologies.retain(|linked| *linked != technology);
                Ok(self.technologies.len() != before)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProfileId, TechnologyId};

    fn create(title: &str, display_order: u32, technologies: &[u32]) -> ProjectCreate {
        ProjectCreate {
            user: ProfileId(1),
            title: title.into(),
            description: "A project".into(),
            technologies: technologies.iter().copied().map(TechnologyId).collect(),
            live_link: String::new(),
            github_link: String::new(),
            image: None,
            display_order,
        }
    }

    #[tokio::test]
    async fn test_projects_list_by_display_order_then_newest_first() {
        let (actor, client) = new(10);
        tokio::spawn(actor.run(()));

        client.create(create("late", 2, &[])).await.unwrap();
        client.create(create("first older", 0, &[])).await.unwrap();
        client.create(create("first newer", 0, &[])).await.unwrap();
        client.create(create("middle", 1, &[])).await.unwrap();

        let titles: Vec<String> = client
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["first newer", "first older", "middle", "late"]);
    }

    #[tokio::test]
    async fn test_technologies_are_normalized_and_detachable() {
        let (actor, client) = new(10);
        tokio::spawn(actor.run(()));

        let project = client.create(create("stack", 0, &[3, 1, 3])).await.unwrap();
        assert_eq!(project.technologies, vec![TechnologyId(1), TechnologyId(3)]);

        let using = client
            .list(Some(ProjectFilter::UsesTechnology(TechnologyId(3))))
            .await
            .unwrap();
        assert_eq!(using.len(), 1);

        let detached = client
            .perform_action(project.id, ProjectAction::DetachTechnology(TechnologyId(3)))
            .await
            .unwrap();
        assert!(detached);
        let again = client
            .perform_action(project.id, ProjectAction::DetachTechnology(TechnologyId(3)))
            .await
            .unwrap();
        assert!(!again);

        let project = client.get(project.id).await.unwrap().unwrap();
        assert_eq!(project.technologies, vec![TechnologyId(1)]);
    }
}
