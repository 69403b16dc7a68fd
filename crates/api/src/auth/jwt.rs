//! Session tokens.
//!
//! A session token is an HS256-signed JWT carrying a [`Claims`] payload. The
//! `jti` claim names a row in `user_sessions`; only its SHA-256 hash is stored
//! server-side, so a database leak does not expose live sessions and logging
//! out revokes the token even though its signature would still verify.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use stickynotes_core::types::{DbId, Timestamp};
use uuid::Uuid;

use crate::config::{env_or, env_required, ConfigError};

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4), keys the server-side session row.
    pub jti: String,
}

/// Configuration for session tokens and the cookie that carries them.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 336, two weeks).
    pub expiry_hours: i64,
    /// Whether the cookie is marked `Secure` (default: `false`).
    pub cookie_secure: bool,
}

/// Default session lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24 * 14;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `SESSION_SECRET`        | **yes**  | --      |
    /// | `SESSION_EXPIRY_HOURS`  | no       | `336`   |
    /// | `SESSION_COOKIE_SECURE` | no       | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("SESSION_SECRET")?;
        let expiry_hours: i64 = env_or("SESSION_EXPIRY_HOURS", DEFAULT_EXPIRY_HOURS)?;
        if expiry_hours <= 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_EXPIRY_HOURS",
                value: expiry_hours.to_string(),
            });
        }

        Ok(Self {
            secret,
            expiry_hours,
            cookie_secure: env_or("SESSION_COOKIE_SECURE", false)?,
        })
    }
}

/// A freshly signed token plus what the server persists about it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Signed JWT, sent to the browser.
    pub token: String,
    /// SHA-256 hex digest of the `jti`, stored in `user_sessions`.
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Sign a new session token for `user_id`.
pub fn issue_session_token(
    user_id: DbId,
    config: &SessionConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::hours(config.expiry_hours);
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti,
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken {
        token,
        token_hash: hash_token_id(&claims.jti),
        expires_at,
    })
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &SessionConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Compute the SHA-256 hex digest of a token id.
pub fn hash_token_id(jti: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(jti.as_bytes());
    format!("{:x}", hasher.finalize())
}
