use crate::error::FieldErrors;
use crate::model::{ProficiencyLevel, ProfileId, Skill, SkillCreate, SkillId, SkillUpdate};
use crate::transfer::fields::{present, Field, FieldReader, Mode};
use serde::Serialize;
use serde_json::Value;

const USER: Field = Field::required("user");
const NAME: Field = Field::required("name").max_length(50);
const PROFICIENCY_LEVEL: Field = Field::required("proficiency_level");
const CATEGORY: Field = Field::required("category").max_length(50);
const CERTIFICATION_URL: Field = Field::optional("certification_url").nullable().blank();

pub fn read_create(body: &Value) -> Result<SkillCreate, FieldErrors> {
    let mut reader = FieldReader::new(body, Mode::Create)?;
    let user = reader.primary_key(&USER);
    let name = reader.text(&NAME);
    let proficiency_level = reader.choice(&PROFICIENCY_LEVEL, ProficiencyLevel::from_code);
    let category = reader.text(&CATEGORY);
    let certification_url = reader.nullable_url(&CERTIFICATION_URL);
    reader.finish()?;

    Ok(SkillCreate {
        user: ProfileId(present(&USER, user)?),
        name: present(&NAME, name)?,
        proficiency_level: present(&PROFICIENCY_LEVEL, proficiency_level)?,
        category: present(&CATEGORY, category)?,
        certification_url: certification_url.flatten(),
    })
}

pub fn read_update(body: &Value, mode: Mode) -> Result<SkillUpdate, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let update = SkillUpdate {
        user: reader.primary_key(&USER).map(ProfileId),
        name: reader.text(&NAME),
        proficiency_level: reader.choice(&PROFICIENCY_LEVEL, ProficiencyLevel::from_code),
        category: reader.text(&CATEGORY),
        certification_url: reader.nullable_url(&CERTIFICATION_URL),
    };
    reader.finish()?;
    Ok(update)
}

#[derive(Debug, Serialize)]
pub struct SkillRepr<'a> {
    pub id: SkillId,
    pub user: ProfileId,
    pub name: &'a str,
    pub proficiency_level: ProficiencyLevel,
    pub category: &'a str,
    pub certification_url: Option<&'a str>,
}

impl<'a> SkillRepr<'a> {
    pub fn new(skill: &'a Skill) -> Self {
        Self {
            id: skill.id,
            user: skill.user,
            name: &skill.name,
            proficiency_level: skill.proficiency_level,
            category: &skill.category,
            certification_url: skill.certification_url.as_deref(),
        }
    }
}
