//! Application Configuration
//!
//! Configuration for session issuance and verification. Built once at
//! startup from the process environment and passed to constructors.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Request/response header carrying the anti-forgery value
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// Secret key for HMAC signing (32 bytes)
    pub secret: [u8; 32],
    /// Token validity (1 hour)
    pub ttl: Duration,
    /// Whether to require Secure cookie (everywhere but development)
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session_token".to_string(),
            secret: [0u8; 32],
            ttl: Duration::from_secs(3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
        }
    }
}

impl SessionConfig {
    /// Create config with a random secret
    pub fn with_random_secret() -> Self {
        let bytes = platform::crypto::random_bytes(32);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&bytes);
        Self {
            secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie settings for issuing a session
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.ttl.as_secs() as i64),
        }
    }

    /// Cookie settings for clearing a session
    pub fn clear_cookie(&self) -> CookieConfig {
        CookieConfig {
            max_age_secs: Some(0),
            ..self.session_cookie()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_hour_strict() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_development_cookie_not_secure() {
        let config = SessionConfig::development();
        assert!(!config.cookie_secure);
        // Random secret, not the zero default
        assert_ne!(config.secret, [0u8; 32]);
    }

    #[test]
    fn test_session_cookie_settings() {
        let config = SessionConfig::with_random_secret();
        let cookie = config.session_cookie().build_set_cookie("tok");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
    }
}
