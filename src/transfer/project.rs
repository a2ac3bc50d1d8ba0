use crate::error::FieldErrors;
use crate::model::{ProfileId, Project, ProjectCreate, ProjectId, ProjectUpdate, TechnologyId};
use crate::transfer::fields::{present, Field, FieldReader, Mode};
use crate::transfer::MediaLinks;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

const USER: Field = Field::required("user");
const TITLE: Field = Field::required("title").max_length(200);
const DESCRIPTION: Field = Field::required("description");
const TECHNOLOGIES: Field = Field::optional("technologies");
const LIVE_LINK: Field = Field::optional("live_link").blank();
const GITHUB_LINK: Field = Field::optional("github_link").blank();
const IMAGE: Field = Field::optional("image").nullable().blank().max_length(100);
const DISPLAY_ORDER: Field = Field::optional("display_order");

fn technology_ids(ids: Vec<u32>) -> Vec<TechnologyId> {
    ids.into_iter().map(TechnologyId).collect()
}

pub fn read_create(body: &Value) -> Result<ProjectCreate, FieldErrors> {
    let mut reader = FieldReader::new(body, Mode::Create)?;
    let user = reader.primary_key(&USER);
    let title = reader.text(&TITLE);
    let description = reader.text(&DESCRIPTION);
    let technologies = reader.primary_keys(&TECHNOLOGIES);
    let live_link = reader.url(&LIVE_LINK);
    let github_link = reader.url(&GITHUB_LINK);
    let image = reader.nullable_text(&IMAGE);
    let display_order = reader.unsigned(&DISPLAY_ORDER);
    reader.finish()?;

    Ok(ProjectCreate {
        user: ProfileId(present(&USER, user)?),
        title: present(&TITLE, title)?,
        description: present(&DESCRIPTION, description)?,
        technologies: technology_ids(technologies.unwrap_or_default()),
        live_link: live_link.unwrap_or_default(),
        github_link: github_link.unwrap_or_default(),
        image: image.flatten(),
        display_order: display_order.unwrap_or(0),
    })
}

pub fn read_update(body: &Value, mode: Mode) -> Result<ProjectUpdate, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let update = ProjectUpdate {
        user: reader.primary_key(&USER).map(ProfileId),
        title: reader.text(&TITLE),
        description: reader.text(&DESCRIPTION),
        technologies: reader.primary_keys(&TECHNOLOGIES).map(technology_ids),
        live_link: reader.url(&LIVE_LINK),
        github_link: reader.url(&GITHUB_LINK),
        image: reader.nullable_text(&IMAGE),
        display_order: reader.unsigned(&DISPLAY_ORDER),
    };
    reader.finish()?;
    Ok(update)
}

#[derive(Debug, Serialize)]
pub struct ProjectRepr<'a> {
    pub id: ProjectId,
    pub user: ProfileId,
    pub title: &'a str,
    pub description: &'a str,
    pub technologies: &'a [TechnologyId],
    pub live_link: &'a str,
    pub github_link: &'a str,
    pub image: Option<String>,
    pub display_order: u32,
    pub created_at: DateTime<Utc>,
}

impl<'a> ProjectRepr<'a> {
    pub fn new(project: &'a Project, links: &MediaLinks) -> Self {
        Self {
            id: project.id,
            user: project.user,
            title: &project.title,
            description: &project.description,
            technologies: &project.technologies,
            live_link: &project.live_link,
            github_link: &project.github_link,
            image: links.optional(project.image.as_deref()),
            display_order: project.display_order,
            created_at: project.created_at,
        }
    }
}
