//! Update Publication Use Case
//!
//! Partial owner-only update. Ownership is checked against the stored
//! record, never against anything the client sends, and there is no owner
//! field on the input at all.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use kernel::id::{PublicationId, UserId};
use platform::upload::{ImageStore, PendingUpload, UploadKind};

use crate::application::create::validate_fecha;
use crate::domain::repository::{PublicationRecord, PublicationRepository};
use crate::domain::value_object::{Category, PublicationStatus, PublicationType};
use crate::error::{PubError, PubResult};

/// Partial update: `None` leaves the stored field untouched. A new image
/// stays buffered until every check has passed.
#[derive(Debug, Default)]
pub struct UpdatePublicationInput {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub lugar: Option<String>,
    pub fecha: Option<String>,
    pub estado: Option<String>,
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub imagen: Option<PendingUpload>,
}

/// Validated subset of a partial update
#[derive(Debug, Default)]
struct ValidatedUpdate {
    titulo: Option<String>,
    descripcion: Option<String>,
    lugar: Option<String>,
    fecha: Option<NaiveDate>,
    estado: Option<PublicationStatus>,
    tipo: Option<PublicationType>,
    categoria: Option<Category>,
}

/// Validate only the supplied fields, accumulating every violation.
/// Supplied fields follow the same rules as creation.
fn validate_partial(
    input: UpdatePublicationInput,
    today: NaiveDate,
) -> Result<ValidatedUpdate, Vec<String>> {
    let mut errores = Vec::new();
    let mut validated = ValidatedUpdate::default();

    if let Some(titulo) = input.titulo {
        let titulo = titulo.trim().to_string();
        if titulo.is_empty() {
            errores.push("El título es requerido".to_string());
        } else if titulo.chars().count() < 3 {
            errores.push("El título debe tener al menos 3 caracteres".to_string());
        } else {
            validated.titulo = Some(titulo);
        }
    }

    if let Some(descripcion) = input.descripcion {
        let descripcion = descripcion.trim().to_string();
        if descripcion.is_empty() {
            errores.push("La descripción es requerida".to_string());
        } else if descripcion.chars().count() < 10 {
            errores.push("La descripción debe tener al menos 10 caracteres".to_string());
        } else {
            validated.descripcion = Some(descripcion);
        }
    }

    if let Some(lugar) = input.lugar {
        let lugar = lugar.trim().to_string();
        if lugar.is_empty() {
            errores.push("El lugar es requerido".to_string());
        } else {
            validated.lugar = Some(lugar);
        }
    }

    if let Some(fecha) = input.fecha {
        match validate_fecha(&fecha, today) {
            Ok(fecha) => validated.fecha = Some(fecha),
            Err(e) => errores.push(e),
        }
    }

    if let Some(estado) = input.estado {
        match PublicationStatus::parse(&estado) {
            Ok(estado) => validated.estado = Some(estado),
            Err(e) => errores.push(e),
        }
    }

    if let Some(tipo) = input.tipo {
        match PublicationType::parse(&tipo) {
            Ok(tipo) => validated.tipo = Some(tipo),
            Err(e) => errores.push(e),
        }
    }

    if let Some(categoria) = input.categoria {
        match Category::parse(&categoria) {
            Ok(categoria) => validated.categoria = Some(categoria),
            Err(e) => errores.push(e),
        }
    }

    if errores.is_empty() {
        Ok(validated)
    } else {
        Err(errores)
    }
}

/// Update publication use case
pub struct UpdatePublicationUseCase<R>
where
    R: PublicationRepository,
{
    repo: Arc<R>,
    images: Arc<ImageStore>,
}

impl<R> UpdatePublicationUseCase<R>
where
    R: PublicationRepository,
{
    pub fn new(repo: Arc<R>, images: Arc<ImageStore>) -> Self {
        Self { repo, images }
    }

    /// Apply a partial update to `id`, acting as `acting_user`.
    /// Existence is checked before ownership, ownership before validation.
    pub async fn execute(
        &self,
        id: &PublicationId,
        acting_user: &UserId,
        mut input: UpdatePublicationInput,
    ) -> PubResult<PublicationRecord> {
        let imagen = input.imagen.take();

        let mut publication = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PubError::NotFound)?;

        if &publication.owner_id != acting_user {
            return Err(PubError::NotOwner);
        }

        let validated =
            validate_partial(input, Utc::now().date_naive()).map_err(PubError::Validation)?;

        if let Some(titulo) = validated.titulo {
            publication.titulo = titulo;
        }
        if let Some(descripcion) = validated.descripcion {
            publication.descripcion = descripcion;
        }
        if let Some(lugar) = validated.lugar {
            publication.lugar = lugar;
        }
        if let Some(fecha) = validated.fecha {
            publication.fecha = fecha;
        }
        if let Some(estado) = validated.estado {
            publication.estado = estado;
        }
        if let Some(tipo) = validated.tipo {
            publication.tipo = tipo;
        }
        if let Some(categoria) = validated.categoria {
            publication.categoria = categoria;
        }
        // The image only hits the disk once every check has passed
        if let Some(pending) = imagen {
            publication.imagen_url = Some(
                self.images
                    .store_pending(UploadKind::Publicaciones, &pending)
                    .await?,
            );
        }

        publication.touch();
        self.repo.update(&publication).await?;

        tracing::info!(publication_id = %publication.publication_id, "publication updated");

        self.repo
            .find_record(&publication.publication_id)
            .await?
            .ok_or_else(|| {
                PubError::Internal("publicación recién actualizada no encontrada".to_string())
            })
    }
}
