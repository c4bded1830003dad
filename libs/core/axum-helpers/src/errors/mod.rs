pub mod fault;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use fault::{Fault, internal_server_error};

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Field-level violations: field name -> human-readable message.
///
/// An empty map means the candidate is acceptable.
pub type Violations = BTreeMap<String, String>;

/// Body of 404 and 409 responses.
///
/// ```json
/// { "message": "User not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of 400 responses.
///
/// ```json
/// {
///   "message": "Validation failed",
///   "errors": { "email": "Invalid email format" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: Violations,
}

/// Body of 500 responses. The underlying cause is never included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaultResponse {
    pub error: String,
}

/// Application error type that can be converted to HTTP responses.
///
/// Handler-level outcomes (`Validation`, `NotFound`, `Conflict`) render their
/// own bodies. `Internal` is rendered as a [`Fault`] so the error trap can
/// replace it with the generic 500 body.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation failed: {0:?}")]
    Validation(Violations),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field validation failure.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(Violations::from([(field.into(), message.into())]))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(violations(&errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::info!(?errors, "Validation failed");
                let body = ValidationErrorResponse {
                    message: messages::VALIDATION_FAILED.to_string(),
                    errors,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                messages::UNAUTHORIZED,
            )
                .into_response(),
            AppError::NotFound(message) => {
                tracing::info!("Not found: {}", message);
                (StatusCode::NOT_FOUND, Json(MessageResponse { message })).into_response()
            }
            AppError::Conflict(message) => {
                tracing::info!("Conflict: {}", message);
                (StatusCode::CONFLICT, Json(MessageResponse { message })).into_response()
            }
            AppError::Internal(detail) => Fault::new(detail).into_response(),
        }
    }
}

/// Flattens `validator` errors into one message per field.
///
/// The first error of a field wins; errors without a message fall back to
/// their code.
pub fn violations(errors: &ValidationErrors) -> Violations {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::borrow::Cow;
    use validator::ValidationError;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_message_body() {
        let response = AppError::NotFound("User not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"message": "User not found"}));
    }

    #[tokio::test]
    async fn test_conflict_renders_message_body() {
        let response = AppError::Conflict("Email already exists".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Email already exists"})
        );
    }

    #[tokio::test]
    async fn test_validation_renders_field_errors() {
        let response = AppError::invalid("name", "Name is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Validation failed", "errors": {"name": "Name is required"}})
        );
    }

    #[tokio::test]
    async fn test_unauthorized_is_plain_text() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Unauthorized");
    }

    #[tokio::test]
    async fn test_internal_hides_detail_and_carries_fault() {
        let response = AppError::Internal("lock poisoned".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let fault = response.extensions().get::<Fault>().cloned().unwrap();
        assert_eq!(fault.detail(), "lock poisoned");
        assert_eq!(
            body_json(response).await,
            json!({"error": "Internal server error"})
        );
    }

    #[test]
    fn test_violations_prefers_message_over_code() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "email",
            ValidationError::new("email").with_message(Cow::Borrowed("Invalid email format")),
        );
        errors.add("page", ValidationError::new("range"));

        let flattened = violations(&errors);
        assert_eq!(flattened["email"], "Invalid email format");
        assert_eq!(flattened["page"], "range");
    }
}
