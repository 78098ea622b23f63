//! API server configuration.
//!
//! Layered with the `config` crate, later sources win:
//!
//! ```text
//! built-in defaults  ──►  ./emporium.toml (optional)  ──►  EMPORIUM_* env vars
//! ```
//!
//! e.g. `EMPORIUM_PORT=9000 EMPORIUM_JWT_SECRET=... emporium-api`

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::warn;

/// Secret used when none is configured. Fine for local runs only.
pub const DEV_JWT_SECRET: &str = "emporium-dev-secret-change-in-production";

/// Longest accepted access token lifetime (one year).
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 365 * 24 * 60;

/// API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Name reported by `/health` and in logs.
    pub app_name: String,

    /// Interface to bind.
    pub host: String,

    /// HTTP port.
    pub port: u16,

    /// SQLite database file.
    pub database_path: String,

    /// Pool size.
    pub max_connections: u32,

    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,

    /// Access token lifetime.
    pub access_token_expire_minutes: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            app_name: "Emporium".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_path: "emporium.db".to_string(),
            max_connections: 5,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_expire_minutes: 60,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `emporium.toml` (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("emporium")
    }

    /// Loads configuration using `file_stem` as the optional config file.
    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let settings = Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_path", defaults.database_path)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default(
                "access_token_expire_minutes",
                defaults.access_token_expire_minutes,
            )?
            .add_source(File::with_name(file_stem).required(false))
            .add_source(Environment::with_prefix("EMPORIUM").try_parsing(true))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;

        if config.jwt_secret == DEV_JWT_SECRET {
            warn!("Using the development JWT secret; set EMPORIUM_JWT_SECRET");
        }

        Ok(config)
    }

    /// Checks values the type system can't.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue("jwt_secret".to_string()));
        }
        if !(1..=MAX_ACCESS_TOKEN_MINUTES).contains(&self.access_token_expire_minutes) {
            return Err(ConfigError::InvalidValue(
                "access_token_expire_minutes".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }
        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("host".to_string()))
    }

    /// Access token lifetime in seconds.
    pub fn access_token_lifetime_secs(&self) -> i64 {
        self.access_token_expire_minutes.saturating_mul(60)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
