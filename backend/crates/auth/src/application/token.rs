//! Session Token
//!
//! Stateless signed session token. Wire format is
//! `base64url(claims JSON) . base64url(HMAC-SHA256 signature)`; nothing is
//! persisted server-side, so validity is bounded only by `exp`. The `csrf`
//! claim holds the per-login anti-forgery nonce that must be replayed in a
//! request header alongside the cookie.

use std::time::Duration;

use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed session token")]
    Malformed,

    #[error("bad session token signature")]
    BadSignature,

    #[error("session token expired")]
    Expired,
}

/// Claims embedded in the session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Authenticated user id
    pub sub: Uuid,
    /// User email at issue time
    pub email: String,
    /// Per-login anti-forgery nonce
    pub csrf: String,
    /// Expiry, unix seconds
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(sub: Uuid, email: String, csrf: String, ttl: Duration) -> Self {
        Self {
            sub,
            email,
            csrf,
            exp: Utc::now().timestamp() + ttl.as_secs() as i64,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

/// Sign claims into a session token
pub fn sign(claims: &SessionClaims, secret: &[u8; 32]) -> String {
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(
        serde_json::to_vec(claims).expect("claims serialize to JSON"),
    );

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        payload,
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify a session token and return its claims.
/// The signature is checked before the payload is even parsed.
pub fn verify(token: &str, secret: &[u8; 32]) -> Result<SessionClaims, TokenError> {
    let (payload, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
    if payload.is_empty() || signature_b64.contains('.') {
        return Err(TokenError::Malformed);
    }

    let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::Malformed)?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let claims_bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;
    let claims: SessionClaims =
        serde_json::from_slice(&claims_bytes).map_err(|_| TokenError::Malformed)?;

    if claims.is_expired() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
