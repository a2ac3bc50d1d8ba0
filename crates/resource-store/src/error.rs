//! # Store Errors
//!
//! Errors raised by the store itself, as opposed to the record-level errors each
//! `Record` implementation defines. Record errors travel inside [`StoreError::Rejected`].

/// Errors that can occur while talking to a `ResourceActor`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Record rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the record error carried by [`StoreError::Rejected`].
    ///
    /// Returns the original error unchanged when it is some other variant or when the
    /// boxed error is not an `E`.
    pub fn into_rejection<E>(self) -> Result<E, StoreError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            StoreError::Rejected(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(StoreError::Rejected(other)),
            },
            other => Err(other),
        }
    }
}
