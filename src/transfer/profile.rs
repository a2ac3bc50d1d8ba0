use crate::error::FieldErrors;
use crate::model::{AccountId, Photo, Profile, ProfileCreate, ProfileId, ProfileUpdate};
use crate::transfer::fields::{present, Field, FieldReader, Mode};
use crate::transfer::MediaLinks;
use serde::Serialize;
use serde_json::Value;

const USER: Field = Field::required("user");
const FULL_NAME: Field = Field::required("full_name").max_length(100);
const BIO_SUMMARY: Field = Field::optional("bio_summary").blank();
const RESUME_LINK: Field = Field::optional("resume_link").blank();
const PROFILE_PICTURE: Field = Field::optional("profile_picture").nullable().blank().max_length(100);
const PROFILE_PICTURE_URL: Field = Field::optional("profile_picture_url").nullable().blank();
const LOCATION: Field = Field::optional("location").blank().max_length(100);

pub fn read_create(body: &Value) -> Result<ProfileCreate, FieldErrors> {
    let mut reader = FieldReader::new(body, Mode::Create)?;
    let user = reader.primary_key(&USER);
    let full_name = reader.text(&FULL_NAME);
    let bio_summary = reader.text(&BIO_SUMMARY);
    let resume_link = reader.url(&RESUME_LINK);
    let profile_picture = reader.nullable_text(&PROFILE_PICTURE);
    let profile_picture_url = reader.nullable_url(&PROFILE_PICTURE_URL);
    let location = reader.text(&LOCATION);
    reader.finish()?;

    Ok(ProfileCreate {
        user: AccountId(present(&USER, user)?),
        full_name: present(&FULL_NAME, full_name)?,
        bio_summary: bio_summary.unwrap_or_default(),
        resume_link: resume_link.unwrap_or_default(),
        profile_picture: profile_picture.flatten(),
        profile_picture_url: profile_picture_url.flatten(),
        location: location.unwrap_or_default(),
    })
}

pub fn read_update(body: &Value, mode: Mode) -> Result<ProfileUpdate, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let update = ProfileUpdate {
        user: reader.primary_key(&USER).map(AccountId),
        full_name: reader.text(&FULL_NAME),
        bio_summary: reader.text(&BIO_SUMMARY),
        resume_link: reader.url(&RESUME_LINK),
        profile_picture: reader.nullable_text(&PROFILE_PICTURE),
        profile_picture_url: reader.nullable_url(&PROFILE_PICTURE_URL),
        location: reader.text(&LOCATION),
    };
    reader.finish()?;
    Ok(update)
}

/// JSON form of a profile. The raw picture path is replaced by `profile_photo`.
#[derive(Debug, Serialize)]
pub struct ProfileRepr<'a> {
    pub id: ProfileId,
    pub user: AccountId,
    pub full_name: &'a str,
    pub bio_summary: &'a str,
    pub resume_link: &'a str,
    pub profile_picture_url: Option<&'a str>,
    pub profile_photo: Option<String>,
    pub location: &'a str,
}

impl<'a> ProfileRepr<'a> {
    pub fn new(profile: &'a Profile, links: &MediaLinks) -> Self {
        let profile_photo = match profile.photo() {
            Some(Photo::Uploaded(path)) => Some(links.absolute(path)),
            Some(Photo::External(url)) => Some(url.to_string()),
            None => None,
        };
        Self {
            id: profile.id,
            user: profile.user,
            full_name: &profile.full_name,
            bio_summary: &profile.bio_summary,
            resume_link: &profile.resume_link,
            profile_picture_url: profile.profile_picture_url.as_deref(),
            profile_photo,
            location: &profile.location,
        }
    }
}
