//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing configuration
//! - `environment` - Deployment environment and log output settings
//! - `server` - HTTP server configuration

pub mod auth;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub use auth::JwtConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Raised when an environment variable is present but cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigLoadError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let environment = Environment::from_env()?;
        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            logging: LoggingConfig::from_env(environment)?,
        })
    }
}

/// Read a string variable, falling back to `default` when unset
pub(crate) fn env_or(key: &str, default: impl FnOnce() -> String) -> String {
    std::env::var(key).unwrap_or_else(|_| default())
}

/// Parse a variable, falling back to `default` when unset and failing when malformed
pub(crate) fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, ConfigLoadError> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigLoadError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("PM_SHARED_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("PM_SHARED_TEST_GARBAGE_PORT", "eighty");
        let result: Result<u16, _> = parse_env("PM_SHARED_TEST_GARBAGE_PORT", 8080);
        assert_eq!(
            result.unwrap_err(),
            ConfigLoadError::InvalidValue {
                key: "PM_SHARED_TEST_GARBAGE_PORT".to_string(),
                value: "eighty".to_string(),
            }
        );
    }

    #[test]
    fn test_app_config_deserialize() {
        let config: AppConfig = serde_json::from_str(
            r#"{"environment":"production","jwt":{"secret":"s3cr3t","ttl_seconds":60}}"#,
        )
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.jwt.ttl_seconds, 60);
        assert_eq!(config.server.port, 8080);
    }
}
