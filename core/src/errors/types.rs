//! Error types for token issuance, verification and service configuration

use pm_shared::error_codes;
use thiserror::Error;

/// Token-related errors
///
/// Verification failures are always per-request: callers reject the single
/// request and carry on serving traffic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token was not issued by this service")]
    IssuerMismatch,

    #[error("Invalid token format")]
    MalformedToken,

    #[error("Token expired")]
    Expired,

    #[error("Cannot issue a token without a subject")]
    MissingSubject,

    #[error("Token generation failed")]
    SigningFailed,
}

impl TokenError {
    /// Error code reported to clients
    ///
    /// Expiry keeps its own code so clients can prompt for re-authentication
    /// instead of reporting bad credentials.
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Expired => error_codes::TOKEN_EXPIRED,
            TokenError::SigningFailed => error_codes::INTERNAL_ERROR,
            TokenError::InvalidSignature
            | TokenError::IssuerMismatch
            | TokenError::MalformedToken
            | TokenError::MissingSubject => error_codes::TOKEN_INVALID,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired)
    }
}

/// Startup configuration errors. Any of these must stop the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT secret is missing or empty")]
    MissingSecret,

    #[error("Token lifetime must be a positive number of seconds, got {seconds}")]
    InvalidTtl { seconds: i64 },

    #[error("JWT issuer must not be empty")]
    MissingIssuer,

    #[error("Unsupported JWT algorithm: {algorithm} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm { algorithm: String },
}
