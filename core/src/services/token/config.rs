//! Configuration for the token service

use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;
use pm_shared::JwtConfig;

use crate::errors::ConfigError;

/// Configuration for the token service
///
/// Built once at startup and moved into [`super::TokenService`]; there is no
/// way to change it afterwards.
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Lifetime of every issued token
    pub ttl: Duration,
    /// Value written to and required in the `iss` claim
    pub issuer: String,
    /// Value written to the `aud` claim
    pub audience: String,
}

impl TokenServiceConfig {
    /// Creates a configuration with the default lifetime, issuer, audience and HS512
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        let defaults = JwtConfig::default();
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS512,
            ttl: Duration::seconds(defaults.ttl_seconds),
            issuer: defaults.issuer,
            audience: defaults.audience,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
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

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Checks everything the service needs before it may sign anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.ttl <= Duration::zero() || Utc::now().checked_add_signed(self.ttl).is_none() {
            return Err(ConfigError::InvalidTtl {
                seconds: self.ttl.num_seconds(),
            });
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::MissingIssuer);
        }
        if !is_hmac(self.algorithm) {
            return Err(ConfigError::UnsupportedAlgorithm {
                algorithm: format!("{:?}", self.algorithm),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = ConfigError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        let algorithm = Algorithm::from_str(config.algorithm.trim()).map_err(|_| {
            ConfigError::UnsupportedAlgorithm {
                algorithm: config.algorithm.clone(),
            }
        })?;
        let ttl = Duration::try_seconds(config.ttl_seconds)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or(ConfigError::InvalidTtl {
                seconds: config.ttl_seconds,
            })?;

        let service_config = Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            ttl,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        };
        service_config.validate()?;
        Ok(service_config)
    }
}

fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TokenServiceConfig::new("secret");
        assert_eq!(config.algorithm, Algorithm::HS512);
        assert_eq!(config.ttl, Duration::hours(2));
        assert_eq!(config.issuer, "pension-management");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert_eq!(
            TokenServiceConfig::new("").validate(),
            Err(ConfigError::MissingSecret)
        );
        assert_eq!(
            TokenServiceConfig::new("   ").validate(),
            Err(ConfigError::MissingSecret)
        );
    }

    #[test]
    fn test_non_positive_ttl_is_rejected() {
        let config = TokenServiceConfig::new("secret").with_ttl(Duration::zero());
        assert_eq!(config.validate(), Err(ConfigError::InvalidTtl { seconds: 0 }));
    }

    #[test]
    fn test_asymmetric_algorithm_is_rejected() {
        let config = TokenServiceConfig::new("secret").with_algorithm(Algorithm::RS256);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedAlgorithm { .. })
        ));
    }

    #[test]
    fn test_from_jwt_config() {
        let jwt = JwtConfig::new("secret")
            .with_ttl_minutes(30)
            .with_algorithm("HS256")
            .with_issuer("pension-auth");

        let config = TokenServiceConfig::try_from(&jwt).unwrap();
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.ttl, Duration::minutes(30));
        assert_eq!(config.issuer, "pension-auth");
    }

    #[test]
    fn test_from_jwt_config_rejects_unknown_algorithm() {
        let jwt = JwtConfig::new("secret").with_algorithm("none");
        assert_eq!(
            TokenServiceConfig::try_from(&jwt).unwrap_err(),
            ConfigError::UnsupportedAlgorithm {
                algorithm: "none".to_string()
            }
        );
    }

    #[test]
    fn test_from_jwt_config_rejects_negative_ttl() {
        let mut jwt = JwtConfig::new("secret");
        jwt.ttl_seconds = -1;
        assert_eq!(
            TokenServiceConfig::try_from(&jwt).unwrap_err(),
            ConfigError::InvalidTtl { seconds: -1 }
        );
    }

    #[test]
    fn test_from_jwt_config_rejects_unrepresentable_ttl() {
        let mut jwt = JwtConfig::new("secret");
        jwt.ttl_seconds = 9_000_000_000_000_000;
        assert_eq!(
            TokenServiceConfig::try_from(&jwt).unwrap_err(),
            ConfigError::InvalidTtl {
                seconds: 9_000_000_000_000_000
            }
        );
    }

    #[test]
    fn test_from_jwt_config_rejects_missing_secret() {
        let jwt = JwtConfig::default();
        assert_eq!(
            TokenServiceConfig::try_from(&jwt).unwrap_err(),
            ConfigError::MissingSecret
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", TokenServiceConfig::new("hunter2-hunter2"));
        assert!(!rendered.contains("hunter2-hunter2"));
    }
}
