//! # Transfer Layer
//!
//! Maps records to and from their JSON form. Every entity module enumerates its input
//! fields explicitly (`read_create`, `read_update`) and has a `*Repr` struct that fixes
//! the output field list.
//!
//! Input parsing never touches the store. References to other records are only checked
//! for shape here; existence is checked by the typed clients.

pub mod experience;
pub mod fields;
pub mod message;
pub mod profile;
pub mod project;
pub mod skill;
pub mod technology;

pub use fields::{Field, FieldReader, Mode};

/// Builds absolute URLs for stored media paths.
///
/// `origin` is the scheme and host of the current request, e.g. `http://localhost:8000`.
/// A media URL that is already absolute ignores the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLinks {
    origin: Option<String>,
    media_url: String,
}

impl MediaLinks {
    pub fn new(origin: Option<String>, media_url: impl Into<String>) -> Self {
        let mut media_url = media_url.into();
        if !media_url.ends_with('/') {
            media_url.push('/');
        }
        Self { origin, media_url }
    }

    /// Absolute URL of a path relative to the media root.
    pub fn absolute(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if is_absolute_url(&self.media_url) {
            return format!("{}{}", self.media_url, path);
        }
        match &self.origin {
            Some(origin) => format!(
                "{}/{}{}",
                origin.trim_end_matches('/'),
                self.media_url.trim_start_matches('/'),
                path
            ),
            None => format!("{}{}", self.media_url, path),
        }
    }

    /// Absolute URL of an optional stored path. Empty paths count as absent.
    pub fn optional(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(|p| self.absolute(p))
    }
}

fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
