//! Signed token issuance and verification.
//!
//! Tokens are JWTs signed with HS256 using the configured secret. The only
//! application claim is the account email; `iat` and `exp` are stamped at
//! issuance and `exp` is enforced on decode.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of an issued token in hours
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signature invalid, token malformed, or expired
    #[error("invalid token")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Issue a signed token carrying the given email claim.
pub fn issue_token(email: &str, secret: &str) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify a token and return its decoded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}
