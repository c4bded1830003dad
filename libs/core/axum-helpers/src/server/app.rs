use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, security_headers};
use crate::pipeline::Pipeline;
use axum::{Json, Router, middleware, routing::get};
use core_config::{Environment, server::ServerConfig};
use std::future::IntoFuture;
use std::io;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Starts the Axum server with graceful shutdown.
///
/// On SIGINT/SIGTERM the listener stops accepting and in-flight requests
/// are drained for at most `server_config.shutdown_timeout`.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let (coordinator, mut stop_accepting) = ShutdownCoordinator::new();
    let mut drain_started = coordinator.subscribe();
    let drain_timeout = server_config.shutdown_timeout;

    let signal_handle = coordinator.clone();
    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = stop_accepting.recv().await;
        })
        .into_future();

    let drain_deadline = async move {
        let _ = drain_started.recv().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => {
            result.inspect_err(|e| {
                tracing::error!("Server encountered an error: {:?}", e);
            })?;
            info!("Server stopped");
        }
        _ = drain_deadline => {
            tracing::warn!(
                "In-flight requests exceeded shutdown timeout of {:?}, forcing shutdown",
                drain_timeout
            );
        }
    }

    Ok(())
}

/// Creates the application router around a request pipeline.
///
/// This function sets up:
/// - The pipeline nested under `/api`
/// - OpenAPI JSON at `/api-docs/openapi.json` and Scalar UI at `/scalar`
///   (development only)
/// - Request tracing, security headers and, when origins are configured, CORS
/// - JSON 404 fallback for everything outside `/api`
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Errors
/// Returns an error if a configured CORS origin is invalid.
pub fn create_router<T>(
    pipeline: Pipeline,
    server_config: &ServerConfig,
    environment: &Environment,
) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let mut router = Router::new().nest_service("/api", pipeline);

    if environment.is_development() {
        router = router
            .route("/api-docs/openapi.json", get(|| async { Json(T::openapi()) }))
            .merge(Scalar::with_url("/scalar", T::openapi()));
        info!("API documentation served at /scalar");
    }

    let mut router = router
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(middleware::from_fn(security_headers));

    if !server_config.cors_allowed_origins.is_empty() {
        info!(
            "CORS configured with allowed origins: {}",
            server_config.cors_allowed_origins.join(",")
        );
        router = router.layer(create_cors_layer(&server_config.cors_allowed_origins)?);
    }

    Ok(router)
}
