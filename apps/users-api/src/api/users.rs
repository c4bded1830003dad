//! Users API routes
//!
//! This module wires up the users domain to HTTP routes.

use axum::Router;
use domain_users::{UserRepository, UserService, handlers};

/// Create users router over `repository`
pub fn router<R: UserRepository + 'static>(repository: R) -> Router {
    let service = UserService::new(repository);
    handlers::router(service)
}
