use std::str::FromStr;

use crate::auth::jwt::SessionConfig;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set in the environment")]
    Missing { var: &'static str },

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Every field except the session secret has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite connection string.
    pub database_url: String,
    /// Maximum pooled database connections (default: `5`).
    pub max_db_connections: u32,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token and cookie settings.
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                            |
    /// |------------------------|------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                          |
    /// | `PORT`                 | `3000`                             |
    /// | `DATABASE_URL`         | `sqlite://stickynotes.db?mode=rwc` |
    /// | `MAX_DB_CONNECTIONS`   | `5`                                |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                               |
    ///
    /// Session variables are documented on [`SessionConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            database_url: env_or(
                "DATABASE_URL",
                "sqlite://stickynotes.db?mode=rwc".to_string(),
            )?,
            max_db_connections: env_or("MAX_DB_CONNECTIONS", 5)?,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            session: SessionConfig::from_env()?,
        })
    }
}

/// Read and parse `var`, falling back to `default` when it is unset.
pub(crate) fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

/// Read a variable that has no default.
pub(crate) fn env_required(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing { var }),
    }
}
