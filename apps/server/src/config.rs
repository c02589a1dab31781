//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults suitable for local development.

use std::env;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Allowed CORS origin. `None` allows any origin (development).
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("SARAL_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SARAL_PORT".to_string()))?,

            database_path: env::var("SARAL_DATABASE_PATH")
                .unwrap_or_else(|_| "./saral.db".to_string()),

            cors_origin: env::var("SARAL_CORS_ORIGIN").ok(),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only valid when the env vars are unset, which is the normal
        // test environment.
        if env::var("SARAL_PORT").is_err() {
            let config = ServerConfig::load().unwrap();
            assert_eq!(config.port, 3000);
            assert_eq!(config.database_path, "./saral.db");
        }
    }
}
