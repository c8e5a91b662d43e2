//! Update Profile Use Case
//!
//! Partial self-service profile update. Only supplied fields change; the
//! id and the credential hash are not part of the update surface at all,
//! and a new password is re-hashed with the plaintext discarded.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, HashedPassword};
use platform::upload::{ImageStore, PendingUpload, UploadKind};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::{AuthError, AuthResult};

/// Partial update: `None` leaves the stored field untouched. A new image
/// stays buffered until every check has passed.
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub telefono: Option<String>,
    pub imagen: Option<PendingUpload>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    images: Arc<ImageStore>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, images: Arc<ImageStore>) -> Self {
        Self { user_repo, images }
    }

    /// Apply a partial update to `target_id`, acting as `acting_user`.
    /// A user may only edit themself.
    pub async fn execute(
        &self,
        target_id: &UserId,
        acting_user: &UserId,
        mut input: UpdateProfileInput,
    ) -> AuthResult<User> {
        if target_id != acting_user {
            return Err(AuthError::NotAccountOwner);
        }

        let imagen = input.imagen.take();

        let mut user = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let validated = validate_partial(input).map_err(AuthError::Validation)?;

        // Uniqueness is checked against every *other* record
        if let Some(email) = &validated.email {
            if email != &user.email
                && self
                    .user_repo
                    .exists_by_email(email.as_str(), Some(target_id))
                    .await?
            {
                return Err(AuthError::EmailTaken);
            }
        }

        if let Some(telefono) = &validated.telefono {
            let unchanged = user.telefono.as_ref() == Some(telefono);
            if !unchanged
                && self
                    .user_repo
                    .exists_by_phone(telefono.as_str(), Some(target_id))
                    .await?
            {
                return Err(AuthError::PhoneTaken);
            }
        }

        if let Some(nombre) = validated.nombre {
            user.nombre = nombre;
        }
        if let Some(email) = validated.email {
            user.email = email;
        }
        if let Some(telefono) = validated.telefono {
            user.telefono = Some(telefono);
        }
        // The image only hits the disk once every check has passed
        if let Some(pending) = imagen {
            user.imagen_url = Some(
                self.images
                    .store_pending(UploadKind::Usuarios, &pending)
                    .await?,
            );
        }
        if let Some(password) = validated.password {
            user.password_hash = HashedPassword::from_clear_text(&password)
                .map_err(|e| AuthError::Internal(e.to_string()))?;
        }

        user.touch();
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "profile updated");

        Ok(user)
    }
}

/// Validated subset of a partial update
#[derive(Debug, Default)]
struct ValidatedUpdate {
    nombre: Option<String>,
    email: Option<Email>,
    password: Option<ClearTextPassword>,
    telefono: Option<Phone>,
}

/// Validate only the supplied fields, accumulating every violation
fn validate_partial(input: UpdateProfileInput) -> Result<ValidatedUpdate, Vec<String>> {
    let mut errores = Vec::new();
    let mut validated = ValidatedUpdate::default();

    if let Some(nombre) = input.nombre {
        let nombre = nombre.trim().to_string();
        if nombre.is_empty() {
            errores.push("El nombre es requerido".to_string());
        } else {
            validated.nombre = Some(nombre);
        }
    }

    if let Some(email) = input.email {
        match Email::new(email) {
            Ok(email) => validated.email = Some(email),
            Err(e) => errores.push(e.to_string()),
        }
    }

    if let Some(password) = input.password {
        match ClearTextPassword::new(password) {
            Ok(password) => validated.password = Some(password),
            Err(e) => errores.push(e.to_string()),
        }
    }

    if let Some(telefono) = input.telefono {
        if !telefono.is_empty() {
            match Phone::new(telefono) {
                Ok(telefono) => validated.telefono = Some(telefono),
                Err(e) => errores.push(e.to_string()),
            }
        }
    }

    if errores.is_empty() {
        Ok(validated)
    } else {
        Err(errores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_validate_empty_input_is_noop() {
        let validated = validate_partial(UpdateProfileInput::default()).unwrap();
        assert!(validated.nombre.is_none());
        assert!(validated.email.is_none());
        assert!(validated.password.is_none());
        assert!(validated.telefono.is_none());
    }

    #[test]
    fn test_partial_validate_checks_supplied_fields() {
        let input = UpdateProfileInput {
            email: Some("broken".to_string()),
            password: Some("123".to_string()),
            ..Default::default()
        };
        let errores = validate_partial(input).unwrap_err();
        assert_eq!(errores.len(), 2);
    }

    #[test]
    fn test_partial_validate_ok() {
        let input = UpdateProfileInput {
            nombre: Some(" Nuevo Nombre ".to_string()),
            email: Some("NUEVO@example.com".to_string()),
            ..Default::default()
        };
        let validated = validate_partial(input).unwrap();
        assert_eq!(validated.nombre.as_deref(), Some("Nuevo Nombre"));
        assert_eq!(
            validated.email.as_ref().map(|e| e.as_str()),
            Some("nuevo@example.com")
        );
    }
}
