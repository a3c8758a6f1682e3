use thiserror::Error;
use validator::ValidationErrors;

use crate::db::StoreError;

/// Outcomes a caller of [`RetrospectiveService`](super::RetrospectiveService)
/// must handle.
///
/// `AlreadyExists`, `NotFound`, and `FeedbackItemNotFound` are final domain
/// outcomes. `Store` covers everything unexpected.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Retrospective with name '{0}' already exists")]
    AlreadyExists(String),

    #[error("Retrospective with name '{0}' not found")]
    NotFound(String),

    #[error("Feedback item with id '{id}' not found in retrospective '{retrospective}'")]
    FeedbackItemNotFound { retrospective: String, id: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(name) => Self::AlreadyExists(name),
            other => Self::Store(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
