use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::StatusUnchanged;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("User with id '{0}' already exists")]
    DuplicateId(String),

    #[error(transparent)]
    StatusUnchanged(#[from] StatusUnchanged),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// The storage layer was asked to act on a record it does not hold.
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Coarse classification used to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    RepositoryFailure,
    Internal,
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::ProfileNotFound(_)
            | UserError::DuplicateEmail(_)
            | UserError::DuplicateId(_)
            | UserError::StatusUnchanged(_)
            | UserError::Validation(_) => ErrorKind::InvalidInput,
            UserError::RecordNotFound(_) => ErrorKind::RepositoryFailure,
            UserError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Client-facing message, without the id or email that `Display` appends.
    pub fn public_message(&self) -> String {
        match self {
            UserError::NotFound(_) | UserError::RecordNotFound(_) => "User not found".to_string(),
            UserError::ProfileNotFound(_) => "Profile not found".to_string(),
            UserError::DuplicateEmail(_) => "Email already exists".to_string(),
            UserError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err.kind() {
            ErrorKind::NotFound | ErrorKind::RepositoryFailure => {
                AppError::NotFound(err.public_message())
            }
            ErrorKind::InvalidInput => AppError::BadRequest(err.public_message()),
            ErrorKind::Internal => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
