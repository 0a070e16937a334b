use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Claims carried by a bearer token. `exp` is present only when a token
/// lifetime is configured; by default tokens do not expire.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token")]
    Invalid,

    #[error("token generation failed: {0}")]
    TokenGeneration(String),
}

/// Sign a token for an already-authenticated login.
pub fn issue_token(login: &str, security: &SecurityConfig) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: login.to_string(),
        iat: now.timestamp(),
        exp: security
            .token_expiry_hours
            .map(|hours| (now + Duration::hours(hours as i64)).timestamp()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(security.jwt_secret.as_bytes()),
    )
    .map_err(|err| AuthError::TokenGeneration(err.to_string()))
}

/// Verify a raw `Authorization` value or bare token and return its claims.
///
/// An optional `Bearer ` scheme prefix is stripped. An expired token maps to
/// [`AuthError::Expired`]; every other malformation (bad signature, wrong
/// algorithm, garbage) maps to [`AuthError::Invalid`].
pub fn verify_token(raw: &str, security: &SecurityConfig) -> Result<Claims, AuthError> {
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        return Err(AuthError::Invalid);
    }

    let mut validation = Validation::default();
    // exp is optional on purpose; tokens without a configured lifetime
    // must still verify.
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(security.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Invalid,
    })?;

    Ok(data.claims)
}
