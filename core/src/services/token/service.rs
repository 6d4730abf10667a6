//! Main token service implementation

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::entities::{Audience, Claims, Identity, TokenClaims};
use crate::errors::{ConfigError, TokenError, TokenResult};

use super::config::TokenServiceConfig;

/// Issues and verifies stateless bearer tokens.
///
/// Holds nothing but immutable key material, so a single instance can be
/// shared across threads behind an `Arc` with no locking.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the secret is empty, the lifetime is not
    /// positive, the issuer is empty or the algorithm is not HMAC based.
    pub fn new(config: TokenServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the caller's clock in `verify_at`.
        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a signed token for an already authenticated identity
    ///
    /// # Arguments
    ///
    /// * `identity` - Subject and roles vouched for by the credential check
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Compact JWS string valid for the configured lifetime
    /// * `Err(TokenError)` - Subject is empty or signing failed
    pub fn issue(&self, identity: &Identity) -> TokenResult<String> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token as if the current time were `now`
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> TokenResult<String> {
        if identity.subject().trim().is_empty() {
            return Err(TokenError::MissingSubject);
        }

        let issued_at = now.timestamp();
        let expires_at = now
            .checked_add_signed(self.config.ttl)
            .ok_or(TokenError::SigningFailed)?
            .timestamp();
        let claims = TokenClaims {
            iss: self.config.issuer.clone(),
            aud: Some(Audience::Single(self.config.audience.clone())),
            sub: identity.subject().to_string(),
            authorities: identity.roles().iter().cloned().collect(),
            iat: Some(issued_at),
            exp: expires_at,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| {
                error!(error = %e, subject = %claims.sub, "failed to sign token");
                TokenError::SigningFailed
            })?;

        debug!(
            subject = %claims.sub,
            token_id = %claims.jti,
            expires_at = claims.exp,
            "issued token"
        );
        Ok(token)
    }

    /// Verifies a token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer and expiry all check out
    /// * `Err(TokenError)` - `MalformedToken`, `InvalidSignature`,
    ///   `IssuerMismatch` or `Expired`
    pub fn verify(&self, token: &str) -> TokenResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token against the given clock reading
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> TokenResult<Claims> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| classify_decode_error(e.kind()))?;

        if token_data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Claims::try_from(token_data.claims)
    }

    /// Returns the roles carried by a token, or an empty set when it does not verify.
    ///
    /// This accessor deliberately hides the verification error: an invalid or
    /// expired token reads the same as a token with no roles. Authorization
    /// decisions that must distinguish the two have to call [`Self::verify`].
    pub fn extract_authorities(&self, token: &str) -> BTreeSet<String> {
        match self.verify(token) {
            Ok(claims) => claims.roles,
            Err(e) => {
                debug!(error = %e, "token rejected while reading authorities; returning none");
                BTreeSet::new()
            }
        }
    }

    /// Fast boolean gate for request filters.
    ///
    /// True when `subject` is non-empty and the token verifies (which includes
    /// not being expired). `subject` is not compared with the token subject.
    pub fn is_valid(&self, subject: &str, token: &str) -> bool {
        self.is_valid_at(subject, token, Utc::now())
    }

    pub fn is_valid_at(&self, subject: &str, token: &str, now: DateTime<Utc>) -> bool {
        if subject.is_empty() {
            return false;
        }
        self.verify_at(token, now).is_ok()
    }

    /// Strictly verifies a token and returns only its subject
    pub fn subject(&self, token: &str) -> TokenResult<String> {
        self.verify(token).map(|claims| claims.subject)
    }
}

fn classify_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        ErrorKind::InvalidIssuer => TokenError::IssuerMismatch,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::MalformedToken,
    }
}
