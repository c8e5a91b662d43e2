//! Authentication and user accounts
//!
//! Stateless session auth (HMAC-signed cookie token plus a CSRF header
//! echo) and the user account lifecycle: registration, login, profile
//! reads and self-service updates.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::{CSRF_HEADER, SessionConfig};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::handlers::AuthState;
pub use presentation::middleware::{AuthUser, authenticate, require_session};
pub use presentation::router::router;
