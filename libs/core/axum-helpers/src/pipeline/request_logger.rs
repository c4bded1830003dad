use super::{Next, Stage};
use crate::errors::Fault;
use async_trait::async_trait;
use axum::{
    extract::{OriginalUri, Request},
    http::{HeaderName, HeaderValue},
    response::Response,
};
use chrono::{SecondsFormat, Utc};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Logs every request on the way in and its status and latency on the way out.
///
/// Each request gets a UUID `request_id`, attached to the span and echoed in
/// the `x-request-id` response header.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogger;

#[async_trait]
impl Stage for RequestLogger {
    fn name(&self) -> &'static str {
        "request_logger"
    }

    async fn handle(&self, request: Request, next: Next) -> Result<Response, Fault> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("request", %request_id);
        let started = Instant::now();

        tracing::info!(
            parent: &span,
            method = %request.method(),
            path = %request_path(&request),
            timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "Incoming request"
        );

        let mut response = next.run(request).instrument(span.clone()).await?;

        tracing::info!(
            parent: &span,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Response sent"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        Ok(response)
    }
}

/// The path as the caller sent it, before any `nest_service` prefix stripping.
fn request_path(request: &Request) -> String {
    match request.extensions().get::<OriginalUri>() {
        Some(OriginalUri(uri)) => uri.path().to_owned(),
        None => request.uri().path().to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;
    use axum::{Router, body::Body, http::StatusCode, routing::get};

    #[tokio::test]
    async fn test_passes_response_through_with_request_id() {
        let pipeline = Pipeline::builder()
            .stage(RequestLogger)
            .dispatch(Router::new().route("/", get(|| async { StatusCode::ACCEPTED })));

        let response = pipeline
            .handle(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_request_path_prefers_original_uri() {
        let mut request = Request::builder().uri("/users/7").body(Body::empty()).unwrap();
        assert_eq!(request_path(&request), "/users/7");

        request
            .extensions_mut()
            .insert(OriginalUri("/api/users/7?page=1".parse().unwrap()));
        assert_eq!(request_path(&request), "/api/users/7");
    }
}
