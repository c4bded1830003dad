use super::{Next, Stage};
use crate::auth::{TokenValidator, bearer_token};
use crate::errors::{AppError, Fault};
use async_trait::async_trait;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};

/// Rejects requests without a bearer token the validator accepts.
///
/// On success the [`DecodedToken`](crate::auth::DecodedToken) is inserted
/// into the request extensions for downstream handlers.
pub struct AuthGate {
    validator: Box<dyn TokenValidator>,
}

impl AuthGate {
    pub fn new(validator: impl TokenValidator + 'static) -> Self {
        Self {
            validator: Box::new(validator),
        }
    }
}

#[async_trait]
impl Stage for AuthGate {
    fn name(&self) -> &'static str {
        "auth_gate"
    }

    async fn handle(&self, mut request: Request, next: Next) -> Result<Response, Fault> {
        let verdict = match bearer_token(request.headers()) {
            Some(token) => self.validator.validate(token),
            None => {
                tracing::warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "Unauthorized access attempt: no bearer token"
                );
                return Ok(AppError::Unauthorized.into_response());
            }
        };

        match verdict {
            Ok(decoded) => {
                tracing::debug!(subject = ?decoded.subject(), "Bearer token accepted");
                request.extensions_mut().insert(decoded);
                next.run(request).await
            }
            Err(e) => {
                tracing::warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    error = %e,
                    "Unauthorized access attempt: invalid token"
                );
                Ok(AppError::Unauthorized.into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{DecodedToken, JwtStructureValidator};
    use crate::pipeline::Pipeline;
    use axum::{Extension, Router, body::Body, http::StatusCode, routing::get};
    use http_body_util::BodyExt;

    const TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiI3In0.c2ln";

    fn pipeline() -> Pipeline {
        let routes = Router::new().route(
            "/whoami",
            get(|Extension(token): Extension<DecodedToken>| async move {
                token.subject().unwrap_or_default().to_string()
            }),
        );
        Pipeline::builder()
            .stage(AuthGate::new(JwtStructureValidator))
            .dispatch(routes)
    }

    fn request(authorization: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let response = pipeline().handle(request(None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "Unauthorized");
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        let response = pipeline().handle(request(Some(&format!("Token {TOKEN}")))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_token_is_unauthorized() {
        let response = pipeline().handle(request(Some("Bearer not-a-jwt"))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(response).await, "Unauthorized");
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_claims() {
        let response = pipeline()
            .handle(request(Some(&format!("Bearer {TOKEN}"))))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "7");
    }
}
