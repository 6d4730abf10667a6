//! Deployment environment and the log output it implies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{parse_env, ConfigLoadError};

/// Where the service is running; selects the dotenv file and log defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Reads `APP_ENV`, defaulting to development when unset
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        parse_env("APP_ENV", Environment::Development)
    }

    /// Dotenv file loaded ahead of `.env`
    pub fn dotenv_file(&self) -> String {
        format!(".env.{}", self)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment {other:?}")),
        }
    }
}

/// Subscriber settings consumed by the API binary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
    /// Colour escapes in terminal output
    pub ansi: bool,
}

impl LoggingConfig {
    /// Readable output while developing, machine-parsable JSON in production
    pub fn defaults_for(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                filter: String::from("debug,actix_web=info"),
                format: LogFormat::Pretty,
                ansi: true,
            },
            Environment::Production => Self {
                filter: String::from("info"),
                format: LogFormat::Json,
                ansi: false,
            },
        }
    }

    /// Environment defaults with a `LOG_FORMAT` override
    pub fn from_env(env: Environment) -> Result<Self, ConfigLoadError> {
        let defaults = Self::defaults_for(env);
        Ok(Self {
            format: parse_env("LOG_FORMAT", defaults.format)?,
            ..defaults
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::defaults_for(Environment::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}
