//! Domain-specific error types and error handling.

mod types;

pub use types::{ConfigError, TokenError};

pub type TokenResult<T> = Result<T, TokenError>;
