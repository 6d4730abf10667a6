//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - Issuing HMAC-signed access tokens for authenticated identities
//! - Verifying tokens and extracting their claims
//! - Lenient authority lookup and boolean validity checks for request filters

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
