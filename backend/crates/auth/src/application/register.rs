//! Register Use Case
//!
//! Creates a new user account. Field validation never stops at the first
//! violation: every message is accumulated and returned in one response.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword};
use platform::upload::{ImageStore, PendingUpload, UploadKind};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::{AuthError, AuthResult};

/// Register input, straight from the multipart form. The image stays
/// buffered until every check has passed.
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub telefono: Option<String>,
    pub imagen: Option<PendingUpload>,
}

/// Validated registration fields
#[derive(Debug)]
struct ValidatedRegistration {
    nombre: String,
    email: Email,
    password: ClearTextPassword,
    telefono: Option<Phone>,
}

/// Validate all fields, accumulating every violation
fn validate(input: RegisterInput) -> Result<ValidatedRegistration, Vec<String>> {
    let mut errores = Vec::new();

    let nombre = match input.nombre.map(|n| n.trim().to_string()) {
        Some(n) if !n.is_empty() => Some(n),
        _ => {
            errores.push("El nombre es requerido".to_string());
            None
        }
    };

    let email = match input.email.as_deref() {
        None | Some("") => {
            errores.push("El email es requerido".to_string());
            None
        }
        Some(raw) => match Email::new(raw) {
            Ok(email) => Some(email),
            Err(e) => {
                errores.push(e.to_string());
                None
            }
        },
    };

    let password = match input.password {
        None => {
            errores.push("La contraseña es requerida".to_string());
            None
        }
        Some(raw) => match ClearTextPassword::new(raw) {
            Ok(password) => Some(password),
            Err(e) => {
                errores.push(e.to_string());
                None
            }
        },
    };

    let telefono = match input.telefono.as_deref() {
        None | Some("") => None,
        Some(raw) => match Phone::new(raw) {
            Ok(phone) => Some(phone),
            Err(e) => {
                errores.push(e.to_string());
                None
            }
        },
    };

    if !errores.is_empty() {
        return Err(errores);
    }

    // All Some by construction once errores is empty
    Ok(ValidatedRegistration {
        nombre: nombre.expect("validated"),
        email: email.expect("validated"),
        password: password.expect("validated"),
        telefono,
    })
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    images: Arc<ImageStore>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, images: Arc<ImageStore>) -> Self {
        Self { user_repo, images }
    }

    pub async fn execute(&self, mut input: RegisterInput) -> AuthResult<User> {
        let imagen = input.imagen.take();
        let validated = validate(input).map_err(AuthError::Validation)?;

        // Uniqueness pre-checks name the colliding field; the database's
        // unique indexes remain the last line of defense.
        if self
            .user_repo
            .exists_by_email(validated.email.as_str(), None)
            .await?
        {
            return Err(AuthError::EmailTaken);
        }

        if let Some(telefono) = &validated.telefono {
            if self
                .user_repo
                .exists_by_phone(telefono.as_str(), None)
                .await?
            {
                return Err(AuthError::PhoneTaken);
            }
        }

        let password_hash = HashedPassword::from_clear_text(&validated.password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // The image only hits the disk once every check has passed
        let imagen_url = match imagen {
            Some(pending) => Some(
                self.images
                    .store_pending(UploadKind::Usuarios, &pending)
                    .await?,
            ),
            None => None,
        };

        let user = User::new(
            validated.nombre,
            validated.email,
            password_hash,
            validated.telefono,
            imagen_url,
        );

        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "user registered");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::mem::MemUsers;

    fn full_input() -> RegisterInput {
        RegisterInput {
            nombre: Some("Ana".to_string()),
            email: Some("Ana@Example.com".to_string()),
            password: Some("secreto123".to_string()),
            telefono: Some("099123456".to_string()),
            imagen: None,
        }
    }

    #[test]
    fn test_validate_ok_normalizes_email() {
        let validated = validate(full_input()).unwrap();
        assert_eq!(validated.email.as_str(), "ana@example.com");
        assert_eq!(validated.nombre, "Ana");
        assert!(validated.telefono.is_some());
    }

    #[test]
    fn test_validate_accumulates_every_error() {
        let input = RegisterInput {
            nombre: None,
            email: Some("not-an-email".to_string()),
            password: Some("123".to_string()),
            telefono: Some("abc".to_string()),
            imagen: None,
        };

        let errores = validate(input).unwrap_err();
        // Never stops at the first violation
        assert_eq!(errores.len(), 4);
        assert!(errores.iter().any(|e| e.contains("nombre")));
        assert!(errores.iter().any(|e| e.contains("email")));
        assert!(errores.iter().any(|e| e.contains("contraseña")));
        assert!(errores.iter().any(|e| e.contains("teléfono")));
    }

    #[test]
    fn test_validate_missing_everything() {
        let errores = validate(RegisterInput::default()).unwrap_err();
        assert_eq!(errores.len(), 3); // nombre, email, password; telefono optional
    }

    #[test]
    fn test_validate_phone_optional() {
        let input = RegisterInput {
            telefono: None,
            ..full_input()
        };
        assert!(validate(input).unwrap().telefono.is_none());

        let input = RegisterInput {
            telefono: Some(String::new()),
            ..full_input()
        };
        assert!(validate(input).unwrap().telefono.is_none());
    }

    fn use_case(repo: Arc<MemUsers>, images_root: &std::path::Path) -> RegisterUseCase<MemUsers> {
        RegisterUseCase::new(repo, Arc::new(ImageStore::new(images_root)))
    }

    fn existing_user() -> User {
        let validated = validate(full_input()).unwrap();
        let hash = HashedPassword::from_clear_text(&validated.password).unwrap();
        User::new(
            validated.nombre,
            validated.email,
            hash,
            validated.telefono,
            None,
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(MemUsers::with(existing_user()));

        let input = RegisterInput {
            telefono: Some("098765432".to_string()),
            ..full_input()
        };
        let err = use_case(Arc::clone(&repo), dir.path())
            .execute(input)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(MemUsers::with(existing_user()));

        let input = RegisterInput {
            email: Some("otra@example.com".to_string()),
            ..full_input()
        };
        let err = use_case(Arc::clone(&repo), dir.path())
            .execute(input)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::PhoneTaken));
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_successful_registration_stores_only_a_hash() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(MemUsers::new());

        let user = use_case(Arc::clone(&repo), dir.path())
            .execute(full_input())
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "ana@example.com");
        assert_ne!(user.password_hash.as_str(), "secreto123");
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_rejected_registration_writes_no_image() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(MemUsers::new());

        // Missing required fields, but an image riding along
        let input = RegisterInput {
            imagen: Some(PendingUpload {
                file_name: "foto.png".to_string(),
                bytes: vec![1, 2, 3],
            }),
            ..Default::default()
        };
        let err = use_case(Arc::clone(&repo), dir.path())
            .execute(input)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
