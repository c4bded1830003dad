use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Crates of this workspace that log at the environment's base level.
const WORKSPACE_TARGETS: [&str; 3] = ["users_api", "domain_users", "axum_helpers"];

/// Install the color-eyre panic and error report hooks.
///
/// Reports show the failing location but not the process environment.
/// Repeated calls keep the first installation.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// `EnvFilter` directives used when `RUST_LOG` is unset.
///
/// Workspace crates log at `debug` in development and `info` in production.
/// `tower_http` follows them in development and is held to `warn` in
/// production. Every other target gets `info` or `warn` respectively.
pub fn default_directives(environment: &Environment) -> String {
    let (own, http, rest) = if environment.is_production() {
        ("info", "warn", "warn")
    } else {
        ("debug", "debug", "info")
    };

    WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={own}"))
        .chain([format!("tower_http={http}"), rest.to_string()])
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the global subscriber.
///
/// Production writes flattened JSON lines; development writes pretty,
/// target-annotated events. Both capture span traces for `eyre` reports.
/// `RUST_LOG` replaces [`default_directives`] when set.
///
/// Later calls are no-ops.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_error::ErrorLayer::default());

    let result = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .try_init()
    };

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}
