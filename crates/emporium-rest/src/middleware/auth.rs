//! Static bearer-token authentication middleware.

use crate::responses::AppError;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use emporium_config::AuthConfig;
use emporium_core::EmporiumError;
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware state holding the configured API token.
#[derive(Clone)]
pub struct AuthState {
    api_token: Arc<String>,
}

impl AuthState {
    /// Creates auth state from the auth configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            api_token: Arc::new(config.api_token.clone()),
        }
    }

    /// Creates auth state from a raw token (tests).
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            api_token: Arc::new(token.into()),
        }
    }
}

/// Rejects requests that do not carry `Authorization: Bearer <token>` with
/// the configured token. No user identity is involved; the token is a single
/// shared secret.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(header) = header else {
        debug!("Rejecting request without authorization header");
        return Err(EmporiumError::unauthorized("missing bearer token").into());
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        debug!("Rejecting request with non-bearer authorization scheme");
        return Err(EmporiumError::unauthorized("expected bearer authorization").into());
    };

    if token.is_empty() || token != state.api_token.as_str() {
        debug!("Rejecting request with invalid API token");
        return Err(EmporiumError::unauthorized("invalid API token").into());
    }

    Ok(next.run(request).await)
}
