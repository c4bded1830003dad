//! API routes module
//!
//! Routes are dispatched by the request pipeline, which is mounted under
//! `/api` by `axum_helpers::create_router`.

pub mod users;

use axum::Router;
use axum_helpers::errors::handlers::not_found;
use axum_helpers::{AuthGate, ErrorTrap, JwtStructureValidator, Pipeline, RequestLogger};
use domain_users::UserRepository;

/// Create all API routes
pub fn routes<R: UserRepository + 'static>(repository: R) -> Router {
    Router::new()
        .nest("/users", users::router(repository))
        .fallback(not_found)
}

/// Wrap `routes` in the request pipeline.
///
/// The error trap is outermost so faults from every later stage reach it;
/// the logger only sees requests that passed the gate.
pub fn pipeline(routes: Router) -> Pipeline {
    Pipeline::builder()
        .stage(ErrorTrap)
        .stage(AuthGate::new(JwtStructureValidator))
        .stage(RequestLogger)
        .dispatch(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_users::InMemoryUserRepository;

    #[test]
    fn test_stage_order() {
        let pipeline = pipeline(routes(InMemoryUserRepository::new()));
        assert_eq!(
            pipeline.stage_names(),
            vec!["error_trap", "auth_gate", "request_logger"]
        );
    }
}
