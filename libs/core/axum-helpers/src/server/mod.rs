//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly around the request pipeline, with API documentation
//! - Health endpoint
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{server::ServerConfig, app_info, Environment};
//!
//! let router = create_router::<ApiDoc>(pipeline, &server_config, &Environment::Development)?;
//! let app = router.merge(health_router(app_info!()));
//!
//! create_app(app, &server_config).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::ShutdownCoordinator;
