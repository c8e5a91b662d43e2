//! HTTP Handlers
//!
//! Thin adapters between axum and the use cases. Create and update arrive
//! as multipart forms; the optional `imagen` file is buffered in memory
//! and only persisted once the use case has accepted the request. There
//! is no owner field to parse anywhere: the owner is whoever the session
//! guard authenticated.

use std::sync::Arc;

use auth::application::config::SessionConfig;
use auth::presentation::middleware::AuthUser;
use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::id::{PublicationId, UserId};

use platform::upload::{ImageStore, PendingUpload, UploadError};

use crate::application::{
    CreatePublicationInput, CreatePublicationUseCase, GetPublicationUseCase,
    ListPublicationsInput, ListPublicationsUseCase, UpdatePublicationInput,
    UpdatePublicationUseCase,
};
use crate::domain::repository::PublicationRepository;
use crate::error::{PubError, PubResult};
use crate::presentation::dto::{ListQuery, PublicationListResponse, PublicationResponse};

/// Shared state for the publication routes
pub struct PubState<R> {
    pub repo: Arc<R>,
    pub config: Arc<SessionConfig>,
    pub images: Arc<ImageStore>,
}

impl<R> Clone for PubState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            images: Arc::clone(&self.images),
        }
    }
}

/// GET /publicaciones
pub async fn list_publications<R>(
    State(state): State<PubState<R>>,
    Query(query): Query<ListQuery>,
) -> PubResult<Json<PublicationListResponse>>
where
    R: PublicationRepository + Send + Sync + 'static,
{
    let use_case = ListPublicationsUseCase::new(Arc::clone(&state.repo));
    let page = use_case
        .execute(ListPublicationsInput {
            tipo: query.tipo,
            categoria: query.categoria,
            estado: query.estado,
            usuario_id: query.usuario_id,
            page: query.page,
            limit: query.limit,
        })
        .await?;

    Ok(Json(PublicationListResponse::from(&page)))
}

/// GET /publicaciones/{id}
pub async fn get_publication<R>(
    State(state): State<PubState<R>>,
    Path(id): Path<String>,
) -> PubResult<Json<PublicationResponse>>
where
    R: PublicationRepository + Send + Sync + 'static,
{
    let id = parse_publication_id(&id)?;
    let record = GetPublicationUseCase::new(Arc::clone(&state.repo))
        .execute(&id)
        .await?;

    Ok(Json(PublicationResponse::from(&record)))
}

/// POST /publicaciones (session required, multipart)
pub async fn create_publication<R>(
    State(state): State<PubState<R>>,
    Extension(auth): Extension<AuthUser>,
    multipart: Multipart,
) -> PubResult<Response>
where
    R: PublicationRepository + Send + Sync + 'static,
{
    let form = read_publication_form(multipart).await?;

    let use_case =
        CreatePublicationUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.images));
    let record = use_case
        .execute(
            UserId::from_uuid(auth.user_id),
            CreatePublicationInput {
                titulo: form.titulo,
                descripcion: form.descripcion,
                lugar: form.lugar,
                fecha: form.fecha,
                tipo: form.tipo,
                categoria: form.categoria,
                imagen: form.imagen,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PublicationResponse::from(&record))).into_response())
}

/// PUT /publicaciones/{id} (session required, multipart)
pub async fn update_publication<R>(
    State(state): State<PubState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> PubResult<Json<PublicationResponse>>
where
    R: PublicationRepository + Send + Sync + 'static,
{
    // Malformed id is rejected before any lookup or form handling
    let id = parse_publication_id(&id)?;

    let form = read_publication_form(multipart).await?;

    let use_case =
        UpdatePublicationUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.images));
    let record = use_case
        .execute(
            &id,
            &UserId::from_uuid(auth.user_id),
            UpdatePublicationInput {
                titulo: form.titulo,
                descripcion: form.descripcion,
                lugar: form.lugar,
                fecha: form.fecha,
                estado: form.estado,
                tipo: form.tipo,
                categoria: form.categoria,
                imagen: form.imagen,
            },
        )
        .await?;

    Ok(Json(PublicationResponse::from(&record)))
}

fn parse_publication_id(raw: &str) -> Result<PublicationId, PubError> {
    PublicationId::parse_str(raw).map_err(|_| PubError::InvalidId)
}

/// Text fields plus the buffered image, straight off the wire.
/// `estado` is only honored by the update path; creation always starts
/// "No resuelto" no matter what was sent.
#[derive(Debug, Default)]
struct PublicationForm {
    titulo: Option<String>,
    descripcion: Option<String>,
    lugar: Option<String>,
    fecha: Option<String>,
    estado: Option<String>,
    tipo: Option<String>,
    categoria: Option<String>,
    imagen: Option<PendingUpload>,
}

/// Walk the multipart stream. Known text fields are collected, the
/// `imagen` file is buffered for the use case to store, unknown text
/// fields are ignored, and any other file field is rejected.
async fn read_publication_form(mut multipart: Multipart) -> PubResult<PublicationForm> {
    let mut form = PublicationForm::default();

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
            "titulo" => form.titulo = Some(field.text().await.map_err(form_error)?),
            "descripcion" => form.descripcion = Some(field.text().await.map_err(form_error)?),
            "lugar" => form.lugar = Some(field.text().await.map_err(form_error)?),
            "fecha" => form.fecha = Some(field.text().await.map_err(form_error)?),
            "estado" => form.estado = Some(field.text().await.map_err(form_error)?),
            "tipo" => form.tipo = Some(field.text().await.map_err(form_error)?),
            "categoria" => form.categoria = Some(field.text().await.map_err(form_error)?),
            other => {
                if field.file_name().is_some() {
                    return Err(PubError::Upload(UploadError::UnexpectedField(
                        other.to_string(),
                    )));
                }
            }
        }
    }

    Ok(form)
}

fn form_error(e: MultipartError) -> PubError {
    PubError::Validation(vec![format!("Formulario inválido: {e}")])
}
