//! JSON body extractor with a uniform rejection.

use crate::errors::{AppError, messages};
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// JSON extractor whose rejections render as a 400 with a `body` violation.
///
/// Field rules are not checked here; domain services validate what they
/// receive so their contract holds without HTTP in front of them.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create_user(JsonBody(payload): JsonBody<CreateUser>) -> String {
///     format!("Creating user: {}", payload.name)
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(status = %rejection.status(), "Rejected JSON body: {}", rejection.body_text());
            AppError::invalid(messages::FIELD_BODY, rejection.body_text())
        })?;

        Ok(JsonBody(data))
    }
}
