//! Business services for the authentication core.

pub mod token;

pub use token::{TokenService, TokenServiceConfig};
