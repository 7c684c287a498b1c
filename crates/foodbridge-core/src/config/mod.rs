//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Listing search and matching settings.
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Listing search and geo-matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Default search radius in kilometers when the client supplies
    /// coordinates without a radius.
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    /// Upper bound on the client-supplied radius.
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            max_radius_km: default_max_radius_km(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables of the form `FOODBRIDGE__SECTION__KEY`,
    /// e.g. `FOODBRIDGE__SERVER__PORT=8080`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FOODBRIDGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_radius_km() -> f64 {
    50.0
}

fn default_max_radius_km() -> f64 {
    500.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_defaults() {
        let matching = MatchingConfig::default();
        assert_eq!(matching.default_radius_km, 50.0);
        assert_eq!(matching.max_radius_km, 500.0);
    }

    #[test]
    fn test_env_vars_use_double_underscore_throughout() {
        // SAFETY: the variables are namespaced to this test and no other
        // test in this crate reads the environment.
        unsafe {
            std::env::set_var("FOODBRIDGE__SERVER__PORT", "9099");
            std::env::set_var("FOODBRIDGE__DATABASE__URL", "postgres://localhost/fb_env");
            std::env::set_var("FOODBRIDGE__AUTH__JWT_SECRET", "env-only-secret");
        }

        let config = AppConfig::load("no-such-overlay").expect("config from environment");

        unsafe {
            std::env::remove_var("FOODBRIDGE__SERVER__PORT");
            std::env::remove_var("FOODBRIDGE__DATABASE__URL");
            std::env::remove_var("FOODBRIDGE__AUTH__JWT_SECRET");
        }

        assert_eq!(config.server.port, 9099);
        assert_eq!(config.database.url, "postgres://localhost/fb_env");
        assert_eq!(config.auth.jwt_secret, "env-only-secret");
    }
}
