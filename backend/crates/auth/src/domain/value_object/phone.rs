//! Phone Value Object
//!
//! Permissive phone validation: digits plus common separators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PHONE_MIN_LENGTH: usize = 6;
const PHONE_MAX_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("El teléfono no tiene un formato válido")]
    InvalidFormat,
}

/// Phone number value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> Result<Self, PhoneError> {
        let phone = phone.into().trim().to_string();

        let len = phone.chars().count();
        if !(PHONE_MIN_LENGTH..=PHONE_MAX_LENGTH).contains(&len) {
            return Err(PhoneError::InvalidFormat);
        }

        // At least one digit, and only digits plus common separators
        if !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidFormat);
        }
        let valid = phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
        if !valid {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(phone))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
