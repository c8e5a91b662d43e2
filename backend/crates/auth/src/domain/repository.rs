//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email, exact match against the stored value
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// List all users, newest first
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Check whether an email is registered, optionally excluding one user
    /// (the excluded user is the one being updated)
    async fn exists_by_email(&self, email: &str, exclude: Option<&UserId>) -> AuthResult<bool>;

    /// Check whether a phone is registered, optionally excluding one user
    async fn exists_by_phone(&self, phone: &str, exclude: Option<&UserId>) -> AuthResult<bool>;

    /// Update user (full row; partial semantics are applied on the entity)
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete every user. Test-only reset support.
    async fn delete_all(&self) -> AuthResult<u64>;
}
