//! Ordered request pipeline.
//!
//! A [`Pipeline`] is a fixed list of [`Stage`]s in front of a dispatch
//! endpoint (an axum [`Router`]). Each stage receives the request and a
//! [`Next`] handle for the rest of the chain, and either short-circuits with
//! its own response or forwards.
//!
//! ```text
//! request ─▶ ErrorTrap ─▶ AuthGate ─▶ RequestLogger ─▶ Router (dispatch)
//! response ◀──────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::pipeline::{AuthGate, ErrorTrap, Pipeline, RequestLogger};
//! use axum_helpers::auth::JwtStructureValidator;
//!
//! let pipeline = Pipeline::builder()
//!     .stage(ErrorTrap)
//!     .stage(AuthGate::new(JwtStructureValidator))
//!     .stage(RequestLogger)
//!     .dispatch(api_routes);
//!
//! let app = Router::new().nest_service("/api", pipeline);
//! ```

mod auth_gate;
mod error_trap;
mod request_logger;

pub use auth_gate::AuthGate;
pub use error_trap::ErrorTrap;
pub use request_logger::{REQUEST_ID_HEADER, RequestLogger};

use crate::errors::Fault;
use async_trait::async_trait;
use axum::{Router, extract::Request, response::IntoResponse, response::Response};
use futures::future::BoxFuture;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Service, ServiceExt};

/// One link in the pipeline.
#[async_trait]
pub trait Stage: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Handle `request`, calling `next.run(request)` to continue the chain.
    async fn handle(&self, request: Request, next: Next) -> Result<Response, Fault>;
}

struct Chain {
    stages: Vec<Arc<dyn Stage>>,
    endpoint: Router,
}

/// The remainder of the chain after the current stage.
pub struct Next {
    chain: Arc<Chain>,
    position: usize,
}

impl Next {
    /// Run the next stage, or dispatch when no stage is left.
    pub async fn run(self, request: Request) -> Result<Response, Fault> {
        match self.chain.stages.get(self.position).cloned() {
            Some(stage) => {
                let next = Next {
                    chain: self.chain,
                    position: self.position + 1,
                };
                stage.handle(request, next).await
            }
            None => match self.chain.endpoint.clone().oneshot(request).await {
                Ok(response) => Ok(response),
                Err(never) => match never {},
            },
        }
    }
}

/// Immutable, cheaply cloneable request pipeline.
#[derive(Clone)]
pub struct Pipeline {
    chain: Arc<Chain>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder { stages: Vec::new() }
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.chain.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Push `request` through every stage and the endpoint.
    ///
    /// A fault escaping the chain is rendered as the generic 500 response.
    pub async fn handle(&self, request: Request) -> Response {
        let next = Next {
            chain: Arc::clone(&self.chain),
            position: 0,
        };
        next.run(request)
            .await
            .unwrap_or_else(|fault| fault.into_response())
    }
}

pub struct PipelineBuilder {
    stages: Vec<Arc<dyn Stage>>,
}

impl PipelineBuilder {
    /// Append a stage. Stages run in the order they are added.
    pub fn stage(mut self, stage: impl Stage) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Finish the pipeline with the router that dispatches by method and path.
    pub fn dispatch(self, endpoint: Router) -> Pipeline {
        let chain = Chain {
            stages: self.stages,
            endpoint,
        };
        tracing::debug!(
            stages = ?chain.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            "Request pipeline assembled"
        );
        Pipeline {
            chain: Arc::new(chain),
        }
    }
}

impl Service<Request> for Pipeline {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let pipeline = self.clone();
        Box::pin(async move { Ok(pipeline.handle(request).await) })
    }
}
