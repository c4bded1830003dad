use super::{FaultResponse, messages};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;
use thiserror::Error;

/// An unexpected failure that must not reach the caller verbatim.
///
/// Rendering a `Fault` produces the generic 500 body and stashes the fault in
/// the response extensions, where [`ErrorTrap`](crate::pipeline::ErrorTrap)
/// picks it up, logs the detail and strips it.
#[derive(Debug, Clone, Error)]
#[error("{detail}")]
pub struct Fault {
    detail: String,
}

impl Fault {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Build a fault from a payload caught by `catch_unwind`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let detail = if let Some(message) = payload.downcast_ref::<&str>() {
            format!("panic: {message}")
        } else if let Some(message) = payload.downcast_ref::<String>() {
            format!("panic: {message}")
        } else {
            "panic with non-string payload".to_string()
        };
        Self { detail }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl IntoResponse for Fault {
    fn into_response(self) -> Response {
        let mut response = internal_server_error();
        response.extensions_mut().insert(self);
        response
    }
}

/// The generic 500 response: `{"error": "Internal server error"}`.
pub fn internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FaultResponse {
            error: messages::INTERNAL_ERROR.to_string(),
        }),
    )
        .into_response()
}
