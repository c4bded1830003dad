use axum_helpers::server::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::InMemoryUserRepository;
use tracing::info;
use users_api::{build_app, config::Config};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    let repository = if config.seed_demo_users {
        info!("Seeding demo users");
        InMemoryUserRepository::seeded()
    } else {
        InMemoryUserRepository::new()
    };

    let app = build_app(&config, repository)?;

    info!(
        "Starting {} v{} with graceful shutdown ({:?} timeout)",
        config.app.name, config.app.version, config.server.shutdown_timeout
    );

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
