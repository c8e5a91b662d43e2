//! Password Hashing and Verification
//!
//! Argon2id hashing (memory-hard, OWASP-recommended) with zeroization of
//! the clear text and NFKC normalization before validation.

use std::fmt;

use argon2::{Argon2, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("La contraseña debe tener al menos {MIN_PASSWORD_LENGTH} caracteres")]
    TooShort,

    #[error("La contraseña debe tener como máximo {MAX_PASSWORD_LENGTH} caracteres")]
    TooLong,

    #[error("La contraseña no puede estar vacía")]
    EmptyOrWhitespace,

    #[error("La contraseña contiene caracteres de control inválidos")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Does not implement `Clone`; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with policy validation.
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }
        if normalized.chars().any(|c| c.is_control()) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }
        if normalized.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort);
        }
        if normalized.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClearTextPassword(***)")
    }
}

// ============================================================================
// Hashed Password
// ============================================================================

/// Argon2id password hash in PHC string format.
///
/// This value is safe to persist; it never round-trips to the clear text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Hash a clear text password with Argon2id and a random salt
    pub fn from_clear_text(password: &ClearTextPassword) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_str().as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(Self(hash.to_string()))
    }

    /// Rehydrate from a stored PHC string
    pub fn from_db(hash: String) -> Self {
        Self(hash)
    }

    /// Verify a clear text password against this hash
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        let parsed = argon2::PasswordHash::new(&self.0)
            .map_err(|_| PasswordHashError::InvalidHashFormat)?;

        match Argon2::default().verify_password(password.as_str().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordHashError::HashingFailed(e.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
