//! Startup configuration for the API binary

use pm_core::errors::ConfigError;
use pm_core::services::token::TokenServiceConfig;
use pm_shared::{AppConfig, ConfigLoadError, Environment};
use thiserror::Error;

/// Anything that stops the server from starting
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to read configuration: {0}")]
    Load(#[from] ConfigLoadError),

    #[error("Invalid token configuration: {0}")]
    Token(#[from] ConfigError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub token: TokenServiceConfig,
}

impl Config {
    /// Reads the environment and validates the signing settings up front
    pub fn from_env() -> Result<Self, StartupError> {
        let app = AppConfig::from_env()?;
        Self::from_app_config(app)
    }

    pub fn from_app_config(app: AppConfig) -> Result<Self, StartupError> {
        let token = TokenServiceConfig::try_from(&app.jwt)?;
        Ok(Self { app, token })
    }

    pub fn environment(&self) -> Environment {
        self.app.environment
    }
}
