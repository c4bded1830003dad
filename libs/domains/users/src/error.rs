use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, Violations};
use thiserror::Error;

pub const USER_NOT_FOUND: &str = "User not found";
pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";
pub const ID_ALREADY_EXISTS: &str = "User id already exists";

/// Outcomes of user operations other than success.
///
/// Everything except `Internal` is an expected outcome with a fixed wire
/// message; `Internal` is a store failure and surfaces as a fault.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("User with id {0} already exists")]
    DuplicateId(i64),

    #[error("Invalid input: {0:?}")]
    Validation(Violations),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(USER_NOT_FOUND.to_string()),
            UserError::DuplicateEmail(_) => AppError::Conflict(EMAIL_ALREADY_EXISTS.to_string()),
            UserError::DuplicateId(_) => AppError::Conflict(ID_ALREADY_EXISTS.to_string()),
            UserError::Validation(violations) => AppError::Validation(violations),
            UserError::Internal(detail) => AppError::Internal(detail),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match &self {
            UserError::NotFound(id) => tracing::debug!(user_id = id, "User not found"),
            UserError::DuplicateEmail(email) => tracing::debug!(%email, "Duplicate email"),
            UserError::DuplicateId(id) => tracing::debug!(user_id = id, "Duplicate id"),
            UserError::Validation(_) | UserError::Internal(_) => {}
        }
        AppError::from(self).into_response()
    }
}
