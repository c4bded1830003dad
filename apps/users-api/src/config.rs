use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Start with the two demo users (`SEED_DEMO_USERS`, default `true`)
    pub seed_demo_users: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let seed_demo_users = env_parse("SEED_DEMO_USERS", true)?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            seed_demo_users,
        })
    }
}
