use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    Json,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::crypto::{self, Claims};
use crate::db::LoginRequest;
use crate::AppState;

use super::error::ApiError;

/// Capability check applied to verified token claims.
///
/// Call sites depend on this trait rather than a fixed identity, so a
/// multi-user policy can be swapped in without touching the middleware.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, claims: &Claims) -> bool;
}

/// Authorizes exactly one admin account by email, case-sensitive.
pub struct AdminAuthorizer {
    admin_email: String,
}

impl AdminAuthorizer {
    pub fn new(admin_email: String) -> Self {
        Self { admin_email }
    }
}

impl Authorizer for AdminAuthorizer {
    fn authorize(&self, claims: &Claims) -> bool {
        claims.email == self.admin_email
    }
}

/// Constant-time string equality for credential checks
fn credentials_match(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();

    // Only compare if lengths match (constant-time check)
    provided.len() == expected.len() && provided.ct_eq(expected).into()
}

/// Login endpoint. Issues a signed token for the configured admin account.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<String>, ApiError> {
    let auth = &state.config.auth;
    let email_ok = credentials_match(&request.email, &auth.admin_email);
    let password_ok = credentials_match(&request.password, &auth.admin_password);

    if !email_ok || !password_ok {
        return Err(ApiError::unauthorized("invalid credentials"));
    }

    let token = crypto::issue_token(&request.email, &auth.jwt_secret).map_err(|e| {
        tracing::error!("Failed to issue token: {}", e);
        ApiError::internal("failed to issue token")
    })?;

    tracing::info!("Issued token for {}", request.email);

    Ok(Json(token))
}

/// Middleware guarding the movie routes.
///
/// Extracts the bearer token, verifies it, and runs the configured
/// authorizer over the decoded claims. Claims are not forwarded to handlers.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => return Err(ApiError::unauthorized("missing credentials")),
    };

    let claims = crypto::verify_token(token, &state.config.auth.jwt_secret)
        .map_err(|_| ApiError::unauthorized("invalid token"))?;

    if !state.authorizer.authorize(&claims) {
        return Err(ApiError::forbidden("invalid credentials"));
    }

    Ok(next.run(request).await)
}
