//! User Entity
//!
//! Registered account with credentials and public profile fields.
//! The credential hash lives here but is never serialized outward;
//! DTOs project only the public fields.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, phone::Phone};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub nombre: String,
    /// Unique email (stored lowercased)
    pub email: Email,
    /// Argon2id credential hash, never exposed through the API
    pub password_hash: HashedPassword,
    /// Optional phone, unique when present
    pub telefono: Option<Phone>,
    /// Optional profile image URL path
    pub imagen_url: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        nombre: String,
        email: Email,
        password_hash: HashedPassword,
        telefono: Option<Phone>,
        imagen_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            nombre,
            email,
            password_hash,
            telefono,
            imagen_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the last-modified timestamp after a mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
