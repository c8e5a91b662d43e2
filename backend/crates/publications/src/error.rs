//! Publication Error Types
//!
//! Variants specific to the publication endpoints, mapped onto the unified
//! `kernel::error::AppError` for the wire format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::upload::UploadError;
use thiserror::Error;

/// Publication-specific result type alias
pub type PubResult<T> = Result<T, PubError>;

/// Publication-specific error variants
#[derive(Debug, Error)]
pub enum PubError {
    /// Field validation failed; carries every accumulated message
    #[error("Errores de validación")]
    Validation(Vec<String>),

    /// Path id is not a valid UUID
    #[error("Identificador inválido")]
    InvalidId,

    /// Publication not found
    #[error("Publicación no encontrada")]
    NotFound,

    /// Authenticated user is not the stored owner
    #[error("No tiene permiso para modificar esta publicación")]
    NotOwner,

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

impl PubError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PubError::Validation(_) | PubError::InvalidId => StatusCode::BAD_REQUEST,
            PubError::NotFound => StatusCode::NOT_FOUND,
            PubError::NotOwner => StatusCode::FORBIDDEN,
            PubError::Upload(UploadError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            PubError::Upload(_) => StatusCode::BAD_REQUEST,
            PubError::Database(_) | PubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the unified AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            PubError::Validation(messages) => {
                AppError::validation("Errores de validación", messages.clone())
            }
            // Already logged with their source; the client sees nothing internal
            PubError::Database(_) | PubError::Internal(_) => {
                AppError::internal("Error interno del servidor")
            }
            PubError::Upload(UploadError::Io(_)) => {
                AppError::internal("Error interno del servidor")
            }
            other => {
                let kind = match other.status_code() {
                    StatusCode::FORBIDDEN => ErrorKind::Forbidden,
                    StatusCode::NOT_FOUND => ErrorKind::NotFound,
                    _ => ErrorKind::BadRequest,
                };
                AppError::new(kind, other.to_string())
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PubError::Database(e) => {
                tracing::error!(error = %e, "publication database error");
            }
            PubError::Internal(msg) => {
                tracing::error!(message = %msg, "publication internal error");
            }
            PubError::Upload(UploadError::Io(e)) => {
                tracing::error!(error = %e, "upload I/O error");
            }
            _ => {
                tracing::debug!(error = %self, "publication error");
            }
        }
    }
}

impl IntoResponse for PubError {
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
        assert_eq!(
            PubError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(PubError::InvalidId.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(PubError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PubError::NotOwner.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_validation_carries_details() {
        let err = PubError::Validation(vec![
            "La descripción debe tener al menos 10 caracteres".to_string(),
        ]);
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.details().len(), 1);
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = PubError::Internal("pool timeout talking to 10.0.0.5".to_string());
        let app = err.to_app_error();
        assert_eq!(app.message(), "Error interno del servidor");
    }
}
