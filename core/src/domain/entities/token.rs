//! Token entities for JWT-based authentication.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

/// Name of the array claim carrying role names
pub const AUTHORITIES_CLAIM: &str = "authorities";

/// Wire format of the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer
    pub iss: String,

    /// Audience; other RFC 7519 issuers may send an array or nothing at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Subject (username)
    pub sub: String,

    /// Role names granted to the subject
    #[serde(default)]
    pub authorities: Vec<String>,

    /// Issued at timestamp, optional on the wire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    #[serde(default)]
    pub jti: String,
}

/// `aud` claim in either of its RFC 7519 forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl TokenClaims {
    /// Checks whether the token is expired at `now`
    ///
    /// Expiry is exclusive: a token is already expired at the exact `exp` second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Verified token contents handed back to the request filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub subject: String,
    pub roles: BTreeSet<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub token_id: String,
}

impl TryFrom<TokenClaims> for Claims {
    type Error = TokenError;

    fn try_from(claims: TokenClaims) -> Result<Self, Self::Error> {
        let issued_at = claims.iat.map(timestamp).transpose()?;
        let expires_at = timestamp(claims.exp)?;

        Ok(Self {
            subject: claims.sub,
            roles: claims.authorities.into_iter().collect(),
            issued_at,
            expires_at,
            token_id: claims.jti,
        })
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or(TokenError::MalformedToken)
}
