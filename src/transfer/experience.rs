use crate::error::FieldErrors;
use crate::model::{Experience, ExperienceCreate, ExperienceId, ExperienceUpdate, ProfileId};
use crate::transfer::fields::{present, Field, FieldReader, Mode};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

const USER: Field = Field::required("user");
const JOB_TITLE: Field = Field::required("job_title").max_length(100);
const COMPANY_NAME: Field = Field::required("company_name").max_length(100);
const START_DATE: Field = Field::required("start_date");
const END_DATE: Field = Field::optional("end_date").nullable();
const RESPONSIBILITIES: Field = Field::required("responsibilities");
const IS_CURRENT: Field = Field::optional("is_current");

pub fn read_create(body: &Value) -> Result<ExperienceCreate, FieldErrors> {
    let mut reader = FieldReader::new(body, Mode::Create)?;
    let user = reader.primary_key(&USER);
    let job_title = reader.text(&JOB_TITLE);
    let company_name = reader.text(&COMPANY_NAME);
    let start_date = reader.date(&START_DATE);
    let end_date = reader.nullable_date(&END_DATE);
    let responsibilities = reader.text(&RESPONSIBILITIES);
    let is_current = reader.boolean(&IS_CURRENT);
    reader.finish()?;

    Ok(ExperienceCreate {
        user: ProfileId(present(&USER, user)?),
        job_title: present(&JOB_TITLE, job_title)?,
        company_name: present(&COMPANY_NAME, company_name)?,
        start_date: present(&START_DATE, start_date)?,
        end_date: end_date.flatten(),
        responsibilities: present(&RESPONSIBILITIES, responsibilities)?,
        is_current: is_current.unwrap_or(false),
    })
}

pub fn read_update(body: &Value, mode: Mode) -> Result<ExperienceUpdate, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let update = ExperienceUpdate {
        user: reader.primary_key(&USER).map(ProfileId),
        job_title: reader.text(&JOB_TITLE),
        company_name: reader.text(&COMPANY_NAME),
        start_date: reader.date(&START_DATE),
        end_date: reader.nullable_date(&END_DATE),
        responsibilities: reader.text(&RESPONSIBILITIES),
        is_current: reader.boolean(&IS_CURRENT),
    };
    reader.finish()?;
    Ok(update)
}

#[derive(Debug, Serialize)]
pub struct ExperienceRepr<'a> {
    pub id: ExperienceId,
    pub user: ProfileId,
    pub job_title: &'a str,
    pub company_name: &'a str,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub responsibilities: &'a str,
    pub is_current: bool,
}

impl<'a> ExperienceRepr<'a> {
    pub fn new(experience: &'a Experience) -> Self {
        Self {
            id: experience.id,
            user: experience.user,
            job_title: &experience.job_title,
            company_name: &experience.company_name,
            start_date: experience.start_date,
            end_date: experience.end_date,
            responsibilities: &experience.responsibilities,
            is_current: experience.is_current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dates_are_read_and_written_as_iso() {
        let body = json!({
            "user": 1,
            "job_title": "Engineer",
            "company_name": "Analytical Engines",
            "start_date": "2020-01-15",
            "end_date": null,
            "responsibilities": "Computing",
        });
        let create = read_create(&body).unwrap();
        assert_eq!(create.start_date, NaiveDate::from_ymd_opt(2020, 1, 15).unwrap());
        assert_eq!(create.end_date, None);
        assert!(!create.is_current);

        let experience = Experience {
            id: ExperienceId(1),
            user: create.user,
            job_title: create.job_title,
            company_name: create.company_name,
            start_date: create.start_date,
            end_date: create.end_date,
            responsibilities: create.responsibilities,
            is_current: true,
        };
        let value = serde_json::to_value(ExperienceRepr::new(&experience)).unwrap();
        assert_eq!(value["start_date"], "2020-01-15");
        assert_eq!(value["end_date"], Value::Null);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let errors = read_update(&json!({"start_date": "15.01.2020"}), Mode::Partial).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["start_date"]);
    }
}
