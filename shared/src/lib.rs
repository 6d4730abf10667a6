//! Shared utilities and common types for the pension management services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structure and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigLoadError, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
