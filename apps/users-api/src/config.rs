//! Configuration for Users API

use core_config::{
    app_info, env_bool_or_default, server::ServerConfig, AppInfo, ConfigError, FromEnv,
};
use domain_users::ValidationPolicy;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub users: UsersConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let users = UsersConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            users,
        })
    }
}

/// Users domain settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsersConfig {
    pub validation: ValidationPolicy,
    /// Preload the demo users. Demo profiles are always loaded.
    pub seed_demo_data: bool,
}

impl FromEnv for UsersConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            validation: ValidationPolicy {
                require_existing_profile: env_bool_or_default(
                    "USERS_REQUIRE_EXISTING_PROFILE",
                    true,
                )?,
                require_unique_email: env_bool_or_default("USERS_REQUIRE_UNIQUE_EMAIL", true)?,
            },
            seed_demo_data: env_bool_or_default("USERS_SEED_DEMO_DATA", true)?,
        })
    }
}
