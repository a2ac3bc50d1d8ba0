use crate::model::{AccountId, ProfileId};

/// The portfolio owner's profile. One per account.
///
/// See [`impl Record for Profile`](crate::profile_actor) for creation, uniqueness and the
/// cascade that removes owned projects, skills and experience on delete.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: ProfileId,
    pub user: AccountId,
    pub full_name: String,
    pub bio_summary: String,
    pub resume_link: String,
    /// Uploaded image, relative to the media root.
    pub profile_picture: Option<String>,
    pub profile_picture_url: Option<String>,
    pub location: String,
}

/// Where the profile photo comes from, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Photo<'a> {
    /// Path of the uploaded image, relative to the media root.
    Uploaded(&'a str),
    /// Externally hosted image URL.
    External(&'a str),
}

impl Profile {
    /// The uploaded image wins over the external URL. Empty values count as absent.
    pub fn photo(&self) -> Option<Photo<'_>> {
        let uploaded = self.profile_picture.as_deref().filter(|p| !p.is_empty());
        let external = self.profile_picture_url.as_deref().filter(|u| !u.is_empty());
        uploaded
            .map(Photo::Uploaded)
            .or(external.map(Photo::External))
    }
}

/// Payload for creating a profile.
#[derive(Debug, Clone)]
pub struct ProfileCreate {
    pub user: AccountId,
    pub full_name: String,
    pub bio_summary: String,
    pub resume_link: String,
    pub profile_picture: Option<String>,
    pub profile_picture_url: Option<String>,
    pub location: String,
}

/// Payload for updating a profile. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub user: Option<AccountId>,
    pub full_name: Option<String>,
    pub bio_summary: Option<String>,
    pub resume_link: Option<String>,
    pub profile_picture: Option<Option<String>>,
    pub profile_picture_url: Option<Option<String>>,
    pub location: Option<String>,
}

/// Selects profiles by owning account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFilter {
    Account(AccountId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(picture: Option<&str>, url: Option<&str>) -> Profile {
        Profile {
            id: ProfileId(1),
            user: AccountId(1),
            full_name: "Ada Lovelace".into(),
            bio_summary: String::new(),
            resume_link: String::new(),
            profile_picture: picture.map(String::from),
            profile_picture_url: url.map(String::from),
            location: String::new(),
        }
    }

    #[test]
    fn test_photo_prefers_uploaded_image() {
        let p = profile(Some("profiles/ada.png"), Some("https://example.com/me.jpg"));
        assert_eq!(p.photo(), Some(Photo::Uploaded("profiles/ada.png")));
    }

    #[test]
    fn test_photo_falls_back_to_external_url() {
        let p = profile(None, Some("https://example.com/me.jpg"));
        assert_eq!(p.photo(), Some(Photo::External("https://example.com/me.jpg")));

        let p = profile(Some(""), Some("https://example.com/me.jpg"));
        assert_eq!(p.photo(), Some(Photo::External("https://example.com/me.jpg")));
    }

    #[test]
    fn test_photo_absent() {
        assert_eq!(profile(None, None).photo(), None);
        assert_eq!(profile(None, Some("")).photo(), None);
    }
}
