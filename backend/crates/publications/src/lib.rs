//! Lost-and-found publications
//!
//! Publication lifecycle (create, partial owner-only update) and the
//! filtered, paginated public listing with the owner projection joined in.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{PubError, PubResult};
pub use infra::postgres::PgPublicationRepository;
pub use presentation::handlers::PubState;
pub use presentation::router::router;
