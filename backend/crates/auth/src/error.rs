//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The sign-in failures deliberately
//! collapse into one generic message so accounts cannot be enumerated.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::upload::UploadError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Session cookie absent on a protected route
    #[error("No se proporcionó el token de sesión")]
    MissingToken,

    /// Signature/expiry/CSRF verification failed
    #[error("Token de sesión inválido o expirado")]
    InvalidToken,

    /// Wrong password or unknown email. One message for both cases.
    #[error("Email o contraseña incorrectos")]
    InvalidCredentials,

    /// Field validation failed; carries every accumulated message
    #[error("Errores de validación")]
    Validation(Vec<String>),

    /// Email already registered
    #[error("El email ya está registrado")]
    EmailTaken,

    /// Phone already registered
    #[error("El teléfono ya está registrado")]
    PhoneTaken,

    /// Authenticated user is not the account owner
    #[error("No tiene permiso para modificar este usuario")]
    NotAccountOwner,

    /// User not found
    #[error("Usuario no encontrado")]
    UserNotFound,

    /// Path id is not a valid UUID
    #[error("Identificador inválido")]
    InvalidId,

    /// Image upload failed
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Validation(_) | AuthError::InvalidId => StatusCode::BAD_REQUEST,
            AuthError::EmailTaken | AuthError::PhoneTaken => StatusCode::CONFLICT,
            AuthError::NotAccountOwner => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Upload(UploadError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Upload(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the unified AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(messages) => {
                AppError::validation("Errores de validación", messages.clone())
            }
            // Already logged with their source; the client sees nothing internal
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Error interno del servidor")
            }
            AuthError::Upload(UploadError::Io(_)) => {
                AppError::internal("Error interno del servidor")
            }
            other => {
                let kind = match other.status_code() {
                    StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
                    StatusCode::FORBIDDEN => ErrorKind::Forbidden,
                    StatusCode::NOT_FOUND => ErrorKind::NotFound,
                    StatusCode::CONFLICT => ErrorKind::Conflict,
                    _ => ErrorKind::BadRequest,
                };
                AppError::new(kind, other.to_string())
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "auth internal error");
            }
            AuthError::Upload(UploadError::Io(e)) => {
                tracing::error!(error = %e, "upload I/O error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::PhoneTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::NotAccountOwner.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_generic_credentials_message() {
        // The same message regardless of which check failed
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Email o contraseña incorrectos"
        );
    }

    #[test]
    fn test_conflict_names_the_field() {
        assert!(AuthError::EmailTaken.to_string().contains("email"));
        assert!(AuthError::PhoneTaken.to_string().contains("teléfono"));
    }

    #[test]
    fn test_validation_carries_details() {
        let err = AuthError::Validation(vec!["El nombre es requerido".to_string()]);
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.details().len(), 1);
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = AuthError::Internal("connection string with secrets".to_string());
        let app = err.to_app_error();
        assert_eq!(app.message(), "Error interno del servidor");
    }
}
