//! Query string extractor with a uniform rejection.

use crate::errors::{AppError, messages};
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// Query extractor whose rejections render as a 400 with a `query` violation.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::invalid(messages::FIELD_QUERY, rejection.body_text()))?;

        Ok(QueryParams(params))
    }
}
