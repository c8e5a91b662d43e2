//! Session Guard Middleware
//!
//! Gate for every route requiring identity. A request passes only when the
//! signed session cookie AND the matching anti-forgery header are presented
//! together: the cookie travels automatically, so the header replay is the
//! CSRF defense. On success the authenticated user id is exposed through
//! request extensions for the duration of the request only.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::config::{CSRF_HEADER, SessionConfig};
use crate::application::token;
use crate::error::AuthError;

/// Authenticated identity stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Validate cookie + anti-forgery header and derive the acting user.
///
/// Missing cookie is distinguished from a bad one; everything that fails
/// verification (signature, expiry, malformed, CSRF mismatch) collapses
/// into the same invalid-token error.
pub fn authenticate(headers: &HeaderMap, config: &SessionConfig) -> Result<AuthUser, AuthError> {
    let session_token = platform::cookie::extract_cookie(headers, &config.cookie_name)
        .ok_or(AuthError::MissingToken)?;

    let claims =
        token::verify(&session_token, &config.secret).map_err(|_| AuthError::InvalidToken)?;

    let header_csrf = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::InvalidToken)?;

    if !platform::crypto::constant_time_eq(header_csrf.as_bytes(), claims.csrf.as_bytes()) {
        return Err(AuthError::InvalidToken);
    }

    Ok(AuthUser {
        user_id: claims.sub,
    })
}

/// Middleware that requires a valid session on the wrapped routes
pub async fn require_session(
    State(config): State<Arc<SessionConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    match authenticate(req.headers(), &config) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => Err(e.into_response()),
    }
}
