//! Users API
//!
//! HTTP service exposing the users domain behind the request pipeline.
//!
//! ```text
//! /health                 liveness, outside the pipeline
//! /api/*                  ErrorTrap → AuthGate → RequestLogger → users routes
//! /api-docs, /scalar      OpenAPI docs (development only)
//! ```

pub mod api;
pub mod config;
pub mod openapi;

use axum::Router;
use axum_helpers::server::{create_router, health_router};
use domain_users::UserRepository;
use std::io;

use config::Config;

/// Assemble the full application router around `repository`.
///
/// # Errors
/// Returns an error if a configured CORS origin is invalid.
pub fn build_app<R: UserRepository + 'static>(config: &Config, repository: R) -> io::Result<Router> {
    let pipeline = api::pipeline(api::routes(repository));
    let router = create_router::<openapi::ApiDoc>(pipeline, &config.server, &config.environment)?;

    // Merge health endpoint
    Ok(router.merge(health_router(config.app)))
}
