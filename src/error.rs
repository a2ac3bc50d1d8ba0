//! Error types shared by the record actors, the typed clients and the HTTP layer.

use resource_store::StoreError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Key for errors that belong to the payload as a whole rather than one field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Validation failures keyed by field name. Every offending field is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single message for a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Errors raised by record hooks inside the actors.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Invalid(#[from] FieldErrors),

    #[error("cascade to {resource} failed: {source}")]
    Cascade {
        resource: &'static str,
        #[source]
        source: StoreError,
    },
}

/// Errors returned by the typed clients.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Record(RecordError),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for PortfolioError {
    /// Unwraps record rejections so validation failures keep their field detail.
    fn from(e: StoreError) -> Self {
        match e.into_rejection::<RecordError>() {
            Ok(RecordError::Invalid(errors)) => PortfolioError::Validation(errors),
            Ok(other) => PortfolioError::Record(other),
            Err(StoreError::NotFound(id)) => PortfolioError::NotFound(id),
            Err(other) => PortfolioError::Store(other),
        }
    }
}
