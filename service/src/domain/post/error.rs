use thiserror::Error;

use crate::domain::repository::RepositoryError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Title, summary, and content are required.";
pub const SLUG_TAKEN_MESSAGE: &str = "A blog post with this slug already exists.";
pub const EMPTY_SLUG_MESSAGE: &str = "Slug must contain at least one letter or digit.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Every failure of a content operation. Nothing is swallowed on the way up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// Required field missing or blank. The store was not touched.
    #[error("{0}")]
    Validation(String),

    /// Slug already claimed by another post. Nothing was written.
    #[error("{0}")]
    Conflict(String),

    #[error("Post not found.")]
    NotFound,

    #[error("Unauthorized.")]
    Unauthorized,

    /// Store or network failure; the payload is diagnostic detail.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ContentError {
    pub fn required_fields() -> Self {
        Self::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
    }

    pub fn slug_taken() -> Self {
        Self::Conflict(SLUG_TAKEN_MESSAGE.to_string())
    }

    /// Message safe to show to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<RepositoryError> for ContentError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::UniqueViolation(cause) => {
                tracing::debug!(%cause, "unique violation reported by store");
                Self::slug_taken()
            }
            RepositoryError::DatabaseError(cause) => Self::Transport(cause),
        }
    }
}
