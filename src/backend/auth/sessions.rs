/**
 * Session Tokens
 *
 * This module issues and verifies the signed, time-bound tokens that carry an
 * account's identity between requests.
 *
 * # Token Format
 *
 * HS256 JWT with the claims:
 *
 * - `sub` - account id
 * - `email`, `name` - as stored when the token was issued
 * - `tipo` - `cliente` or `vendedor`
 * - `iat`, `exp` - Unix timestamps, `exp > iat`
 * - `iss` = `compra-pronta-api`, `aud` = `compra-pronta-app`
 *
 * There is no revocation list: any token with a valid signature that has not
 * expired is honored.
 */

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::Role;

/// Fixed issuer identifier
pub const TOKEN_ISSUER: &str = "compra-pronta-api";

/// Fixed audience identifier
pub const TOKEN_AUDIENCE: &str = "compra-pronta-app";

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID
    pub sub: String,
    pub email: String,
    /// Display name
    pub name: String,
    /// Account role
    pub tipo: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// Account id carried in `sub`
    pub fn subject_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Malformed)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Identity fields a token is issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Token errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token malformed")]
    Malformed,
    #[error("token signature invalid")]
    InvalidSignature,
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    }
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
    lifetime_label: String,
}

/// Issues and verifies session tokens
///
/// Cheap to clone; keys are derived once from the configured secret.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<Keys>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("lifetime", &self.keys.lifetime_label)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an issuer
    ///
    /// # Arguments
    /// * `secret` - HMAC signing key
    /// * `lifetime` - how long issued tokens stay valid
    /// * `lifetime_label` - the lifetime as configured, echoed to clients
    pub fn new(secret: &[u8], lifetime: Duration, lifetime_label: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "iat", "sub", "iss", "aud"]);
        validation.leeway = 0;

        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
                lifetime,
                lifetime_label: lifetime_label.into(),
            }),
        }
    }

    /// Configured lifetime label, e.g. `24h`
    pub fn expires_in(&self) -> &str {
        &self.keys.lifetime_label
    }

    /// Issue a token valid from now
    pub fn issue(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`
    pub fn issue_at(&self, subject: &TokenSubject, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let lifetime = i64::try_from(self.keys.lifetime.as_secs())
            .map_err(|_| TokenError::Signing("token lifetime out of range".to_string()))?;
        let iat = issued_at.timestamp();

        let claims = Claims {
            sub: subject.id.to_string(),
            email: subject.email.clone(),
            name: subject.name.clone(),
            tipo: subject.role,
            iat,
            exp: iat.saturating_add(lifetime.max(1)),
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    ///
    /// - `Expired` once `exp` has passed
    /// - `InvalidSignature` if the token was not signed with this key
    /// - `Malformed` for anything else (bad encoding, wrong issuer or
    ///   audience, missing claims, `exp <= iat`, non-UUID subject)
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)?;
        let claims = data.claims;
        if claims.exp <= claims.iat {
            return Err(TokenError::Malformed);
        }
        claims.subject_id()?;
        Ok(claims)
    }
}
