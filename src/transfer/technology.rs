use crate::error::FieldErrors;
use crate::model::{Technology, TechnologyCreate, TechnologyId, TechnologyUpdate};
use crate::transfer::fields::{present, Field, FieldReader, Mode};
use serde::Serialize;
use serde_json::Value;

const NAME: Field = Field::required("name").max_length(50);

pub fn read_create(body: &Value) -> Result<TechnologyCreate, FieldErrors> {
    let mut reader = FieldReader::new(body, Mode::Create)?;
    let name = reader.text(&NAME);
    reader.finish()?;
    Ok(TechnologyCreate {
        name: present(&NAME, name)?,
    })
}

pub fn read_update(body: &Value, mode: Mode) -> Result<TechnologyUpdate, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let update = TechnologyUpdate {
        name: reader.text(&NAME),
    };
    reader.finish()?;
    Ok(update)
}

#[derive(Debug, Serialize)]
pub struct TechnologyRepr<'a> {
    pub id: TechnologyId,
    pub name: &'a str,
}

impl<'a> TechnologyRepr<'a> {
    pub fn new(technology: &'a Technology) -> Self {
        Self {
            id: technology.id,
            name: &technology.name,
        }
    }
}
