//! HTTP Handlers
//!
//! Thin adapters between axum and the use cases. Registration and profile
//! updates arrive as multipart forms so the optional `imagen` file can ride
//! along with the text fields; the file is buffered in memory and only
//! persisted once the use case has accepted the request.

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;

use platform::upload::{ImageStore, PendingUpload, UploadError};

use crate::application::config::{CSRF_HEADER, SessionConfig};
use crate::application::{
    RegisterInput, RegisterUseCase, SignInInput, SignInUseCase, UpdateProfileInput,
    UpdateProfileUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, MessageResponse, SessionUserResponse, UserResponse};
use crate::presentation::middleware::AuthUser;

/// Shared state for the auth routes
pub struct AuthState<R> {
    pub user_repo: Arc<R>,
    pub config: Arc<SessionConfig>,
    pub images: Arc<ImageStore>,
}

impl<R> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            user_repo: Arc::clone(&self.user_repo),
            config: Arc::clone(&self.config),
            images: Arc::clone(&self.images),
        }
    }
}

/// POST /login
pub async fn login<R>(
    State(state): State<AuthState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(Arc::clone(&state.user_repo), Arc::clone(&state.config));
    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    let mut response =
        (StatusCode::OK, Json(SessionUserResponse::from(&output.user))).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| AuthError::Internal(e.to_string()))?,
    );
    // The anti-forgery nonce leaves the server exactly once, here
    response.headers_mut().insert(
        CSRF_HEADER,
        HeaderValue::from_str(&output.csrf_token)
            .map_err(|e| AuthError::Internal(e.to_string()))?,
    );

    Ok(response)
}

/// POST /login/logout. Idempotent: clears the cookie whether or not a
/// valid session was presented.
pub async fn logout<R>(State(state): State<AuthState<R>>) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let cookie = state.config.clear_cookie().build_delete_cookie();

    let mut response = (
        StatusCode::OK,
        Json(MessageResponse {
            mensaje: "Sesión cerrada".to_string(),
        }),
    )
        .into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| AuthError::Internal(e.to_string()))?,
    );

    Ok(response)
}

/// GET /login/me and GET /usuarios/me
pub async fn current_user<R>(
    State(state): State<AuthState<R>>,
    Extension(auth): Extension<AuthUser>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user_id = UserId::from_uuid(auth.user_id);
    let user = state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /usuarios
pub async fn list_users<R>(
    State(state): State<AuthState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let users = state.user_repo.list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /usuarios/{id}
pub async fn get_user<R>(
    State(state): State<AuthState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(UserResponse::from(&user)))
}

/// POST /usuarios (registration, multipart)
pub async fn create_user<R>(
    State(state): State<AuthState<R>>,
    multipart: Multipart,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let form = read_user_form(multipart).await?;

    let use_case = RegisterUseCase::new(Arc::clone(&state.user_repo), Arc::clone(&state.images));
    let user = use_case
        .execute(RegisterInput {
            nombre: form.nombre,
            email: form.email,
            password: form.password,
            telefono: form.telefono,
            imagen: form.imagen,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))).into_response())
}

/// PUT /usuarios/{id} (session required, multipart)
pub async fn update_user<R>(
    State(state): State<AuthState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    // Malformed id is rejected before any lookup or form handling
    let target_id = parse_user_id(&id)?;
    let acting_user = UserId::from_uuid(auth.user_id);

    let form = read_user_form(multipart).await?;

    let use_case =
        UpdateProfileUseCase::new(Arc::clone(&state.user_repo), Arc::clone(&state.images));
    let user = use_case
        .execute(
            &target_id,
            &acting_user,
            UpdateProfileInput {
                nombre: form.nombre,
                email: form.email,
                password: form.password,
                telefono: form.telefono,
                imagen: form.imagen,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

fn parse_user_id(raw: &str) -> Result<UserId, AuthError> {
    UserId::parse_str(raw).map_err(|_| AuthError::InvalidId)
}

/// Text fields plus the buffered image, straight off the wire
#[derive(Debug, Default)]
struct UserForm {
    nombre: Option<String>,
    email: Option<String>,
    password: Option<String>,
    telefono: Option<String>,
    imagen: Option<PendingUpload>,
}

/// Walk the multipart stream. Known text fields are collected, the
/// `imagen` file is buffered for the use case to store, unknown text
/// fields are ignored, and any other file field is rejected.
async fn read_user_form(mut multipart: Multipart) -> AuthResult<UserForm> {
    let mut form = UserForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "imagen" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(form_error)?;
                // Browsers send an empty part for an untouched file input
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.imagen = Some(PendingUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "nombre" => form.nombre = Some(field.text().await.map_err(form_error)?),
            "email" => form.email = Some(field.text().await.map_err(form_error)?),
            "password" => form.password = Some(field.text().await.map_err(form_error)?),
            "telefono" => form.telefono = Some(field.text().await.map_err(form_error)?),
            other => {
                if field.file_name().is_some() {
                    return Err(AuthError::Upload(UploadError::UnexpectedField(
                        other.to_string(),
                    )));
                }
            }
        }
    }

    Ok(form)
}

fn form_error(e: MultipartError) -> AuthError {
    AuthError::Validation(vec![format!("Formulario inválido: {e}")])
}
