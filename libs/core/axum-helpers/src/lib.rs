//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`pipeline`]**: ordered request stages (error trap, auth gate, request logger) in front of a router
//! - **[`auth`]**: bearer token extraction and the pluggable [`TokenValidator`]
//! - **[`errors`]**: the HTTP error contract ([`AppError`], [`Fault`]) and its wire bodies
//! - **[`extractors`]**: extractors whose rejections follow the error contract
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::auth::JwtStructureValidator;
//! use axum_helpers::pipeline::{AuthGate, ErrorTrap, Pipeline, RequestLogger};
//! use axum_helpers::server::{create_app, create_router};
//!
//! let pipeline = Pipeline::builder()
//!     .stage(ErrorTrap)
//!     .stage(AuthGate::new(JwtStructureValidator))
//!     .stage(RequestLogger)
//!     .dispatch(api_routes);
//!
//! let router = create_router::<ApiDoc>(pipeline, &config.server, &config.environment)?;
//! create_app(router, &config.server).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod pipeline;
pub mod server;

// Re-export auth types
pub use auth::{DecodedToken, JwtStructureValidator, TokenError, TokenValidator, bearer_token};

// Re-export pipeline types
pub use pipeline::{AuthGate, ErrorTrap, Next, Pipeline, RequestLogger, Stage};

// Re-export server types
pub use server::{HealthResponse, ShutdownCoordinator, create_app, create_router, health_router};

// Re-export error types
pub use errors::{AppError, Fault, MessageResponse, ValidationErrorResponse, Violations};

// Re-export extractors
pub use extractors::{IdPath, JsonBody, QueryParams};
