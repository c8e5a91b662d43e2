//! Request / Response DTOs
//!
//! The response types are the only shapes that leave this crate over HTTP.
//! There is deliberately no field for the credential hash anywhere here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Compact profile returned by the login endpoint
#[derive(Debug, Serialize)]
pub struct SessionUserResponse {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
}

impl From<&User> for SessionUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            nombre: user.nombre.clone(),
            email: user.email.as_str().to_string(),
        }
    }
}

/// Public profile for the user endpoints
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub telefono: Option<String>,
    pub imagen_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            nombre: user.nombre.clone(),
            email: user.email.as_str().to_string(),
            telefono: user.telefono.as_ref().map(|t| t.as_str().to_string()),
            imagen_url: user.imagen_url.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Simple confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub mensaje: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{ClearTextPassword, HashedPassword};

    fn sample_user() -> User {
        use crate::domain::value_object::{email::Email, phone::Phone};

        let password = ClearTextPassword::new("secreto123".to_string()).unwrap();
        User::new(
            "Ana".to_string(),
            Email::new("ana@example.com".to_string()).unwrap(),
            HashedPassword::from_clear_text(&password).unwrap(),
            Some(Phone::new("+54 11 5555-0001".to_string()).unwrap()),
            None,
        )
    }

    #[test]
    fn test_user_response_never_exposes_credentials() {
        let user = sample_user();
        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("ana@example.com"));
    }

    #[test]
    fn test_session_user_response_is_compact() {
        let user = sample_user();
        let json = serde_json::to_value(&SessionUserResponse::from(&user)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("nombre"));
        assert!(obj.contains_key("email"));
    }
}
