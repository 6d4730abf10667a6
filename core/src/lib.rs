//! # Pension Management Auth Core
//!
//! Stateless token lifecycle for the pension management backend: issue a
//! signed, time-bound token for an authenticated identity and verify it on
//! every later request without any server-side lookup.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Identity, TokenClaims};
pub use errors::{ConfigError, TokenError, TokenResult};
pub use services::{TokenService, TokenServiceConfig};
