//! Token signing configuration

use serde::{Deserialize, Serialize};

use super::{env_or, parse_env, ConfigLoadError};

/// Secrets shorter than this are accepted but flagged by [`JwtConfig::is_weak_secret`]
pub const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

/// JWT authentication configuration
///
/// Loaded once at process start and treated as immutable afterwards. Every
/// value is a deployment constant; nothing here is mutated at runtime.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric key used for HMAC signing. Required, never serialized back out.
    #[serde(skip_serializing)]
    pub secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// JWT audience claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Algorithm for JWT signing (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_seconds: default_ttl_seconds(),
            issuer: default_issuer(),
            audience: default_audience(),
            algorithm: default_algorithm(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in minutes
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_seconds = minutes * 60;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Read the configuration from `JWT_*` environment variables.
    ///
    /// A missing `JWT_SECRET` is not an error here; it yields an empty secret
    /// which the token service refuses at construction.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Ok(Self {
            secret: std::env::var("JWT_SECRET").unwrap_or_default(),
            ttl_seconds: parse_env("JWT_TTL_SECONDS", default_ttl_seconds())?,
            issuer: env_or("JWT_ISSUER", default_issuer),
            audience: env_or("JWT_AUDIENCE", default_audience),
            algorithm: env_or("JWT_ALGORITHM", default_algorithm),
        })
    }

    /// Check whether the secret is shorter than the recommended minimum
    pub fn is_weak_secret(&self) -> bool {
        self.secret.len() < MIN_RECOMMENDED_SECRET_LEN
    }
}

fn default_ttl_seconds() -> i64 {
    7200 // 2 hours
}

fn default_issuer() -> String {
    String::from("pension-management")
}

fn default_audience() -> String {
    String::from("pension-management-portal")
}

fn default_algorithm() -> String {
    String::from("HS512")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert!(config.secret.is_empty());
        assert_eq!(config.ttl_seconds, 7200);
        assert_eq!(config.algorithm, "HS512");
        assert_eq!(config.issuer, "pension-management");
        assert_eq!(config.audience, "pension-management-portal");
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_ttl_minutes(30)
            .with_issuer("issuer-a")
            .with_audience("audience-a")
            .with_algorithm("HS256");

        assert_eq!(config.secret, "my-secret");
        assert_eq!(config.ttl_seconds, 1800);
        assert_eq!(config.issuer, "issuer-a");
        assert_eq!(config.audience, "audience-a");
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_weak_secret());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_secret_is_not_serialized() {
        let config = JwtConfig::new("super-secret-value");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret-value"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: JwtConfig = serde_json::from_str(r#"{"secret":"abc"}"#).unwrap();
        assert_eq!(config.secret, "abc");
        assert_eq!(config.ttl_seconds, 7200);
        assert_eq!(config.algorithm, "HS512");
    }
}
