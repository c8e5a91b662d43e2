//! Process Configuration
//!
//! Loaded once in `main` from the environment into an immutable value;
//! everything downstream receives it by reference or as derived structs.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use auth::application::config::SessionConfig;
use base64::Engine;
use base64::engine::general_purpose;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Immutable process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub environment: Environment,
    pub frontend_origins: Vec<String>,
    pub uploads_dir: PathBuf,
    session_secret: Option<[u8; 32]>,
}

impl AppConfig {
    /// Read the configuration from the environment.
    ///
    /// `SESSION_SECRET` (base64, 32 bytes) is mandatory in production;
    /// in development a missing secret falls back to a random one, which
    /// invalidates sessions on restart.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address")?;

        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let uploads_dir = env::var("UPLOADS_DIR")
            .unwrap_or_else(|_| "uploads".to_string())
            .into();

        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret_b64) => {
                let bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)
                    .context("SESSION_SECRET must be base64")?;
                let secret: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes"))?;
                Some(secret)
            }
            Err(_) if environment == Environment::Production => {
                anyhow::bail!("SESSION_SECRET must be set in production")
            }
            Err(_) => None,
        };

        Ok(Self {
            database_url,
            listen_addr,
            environment,
            frontend_origins,
            uploads_dir,
            session_secret,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Derive the session configuration for the auth layer
    pub fn session_config(&self) -> SessionConfig {
        let base = match self.session_secret {
            Some(secret) => SessionConfig {
                secret,
                ..SessionConfig::default()
            },
            None => SessionConfig::with_random_secret(),
        };

        SessionConfig {
            cookie_secure: self.is_production(),
            ..base
        }
    }
}
