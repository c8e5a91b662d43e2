//! Create Publication Use Case
//!
//! Validation never stops at the first violation: every message is
//! accumulated and returned in one response. The owner always comes from
//! the session and the state always starts "No resuelto"; neither is
//! accepted from the client.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use kernel::id::UserId;
use platform::upload::{ImageStore, PendingUpload, UploadKind};

use crate::domain::entity::publication::Publication;
use crate::domain::repository::{PublicationRecord, PublicationRepository};
use crate::domain::value_object::{Category, PublicationType};
use crate::error::{PubError, PubResult};

/// Create input, straight from the multipart form. The image stays
/// buffered until every check has passed.
#[derive(Debug, Default)]
pub struct CreatePublicationInput {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub lugar: Option<String>,
    pub fecha: Option<String>,
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub imagen: Option<PendingUpload>,
}

/// Validated creation fields
#[derive(Debug)]
struct ValidatedCreate {
    titulo: String,
    descripcion: String,
    lugar: String,
    fecha: NaiveDate,
    tipo: PublicationType,
    categoria: Category,
}

/// Parse `YYYY-MM-DD`, rejecting dates after `today`
pub(crate) fn validate_fecha(raw: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let fecha = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| "La fecha debe tener el formato YYYY-MM-DD".to_string())?;
    if fecha > today {
        return Err("La fecha no puede ser futura".to_string());
    }
    Ok(fecha)
}

/// Validate all fields, accumulating every violation
fn validate(input: CreatePublicationInput, today: NaiveDate) -> Result<ValidatedCreate, Vec<String>> {
    let mut errores = Vec::new();

    let titulo = match input.titulo.map(|t| t.trim().to_string()) {
        None => {
            errores.push("El título es requerido".to_string());
            None
        }
        Some(t) if t.is_empty() => {
            errores.push("El título es requerido".to_string());
            None
        }
        Some(t) if t.chars().count() < 3 => {
            errores.push("El título debe tener al menos 3 caracteres".to_string());
            None
        }
        Some(t) => Some(t),
    };

    let descripcion = match input.descripcion.map(|d| d.trim().to_string()) {
        None => {
            errores.push("La descripción es requerida".to_string());
            None
        }
        Some(d) if d.is_empty() => {
            errores.push("La descripción es requerida".to_string());
            None
        }
        Some(d) if d.chars().count() < 10 => {
            errores.push("La descripción debe tener al menos 10 caracteres".to_string());
            None
        }
        Some(d) => Some(d),
    };

    let lugar = match input.lugar.map(|l| l.trim().to_string()) {
        Some(l) if !l.is_empty() => Some(l),
        _ => {
            errores.push("El lugar es requerido".to_string());
            None
        }
    };

    let fecha = match input.fecha.as_deref() {
        None | Some("") => {
            errores.push("La fecha es requerida".to_string());
            None
        }
        Some(raw) => match validate_fecha(raw, today) {
            Ok(fecha) => Some(fecha),
            Err(e) => {
                errores.push(e);
                None
            }
        },
    };

    let tipo = match input.tipo.as_deref() {
        None | Some("") => {
            errores.push("El tipo es requerido".to_string());
            None
        }
        Some(raw) => match PublicationType::parse(raw) {
            Ok(tipo) => Some(tipo),
            Err(e) => {
                errores.push(e);
                None
            }
        },
    };

    let categoria = match input.categoria.as_deref() {
        None | Some("") => {
            errores.push("La categoría es requerida".to_string());
            None
        }
        Some(raw) => match Category::parse(raw) {
            Ok(categoria) => Some(categoria),
            Err(e) => {
                errores.push(e);
                None
            }
        },
    };

    if !errores.is_empty() {
        return Err(errores);
    }

    // All Some by construction once errores is empty
    Ok(ValidatedCreate {
        titulo: titulo.expect("validated"),
        descripcion: descripcion.expect("validated"),
        lugar: lugar.expect("validated"),
        fecha: fecha.expect("validated"),
        tipo: tipo.expect("validated"),
        categoria: categoria.expect("validated"),
    })
}

/// Create publication use case
pub struct CreatePublicationUseCase<R>
where
    R: PublicationRepository,
{
    repo: Arc<R>,
    images: Arc<ImageStore>,
}

impl<R> CreatePublicationUseCase<R>
where
    R: PublicationRepository,
{
    pub fn new(repo: Arc<R>, images: Arc<ImageStore>) -> Self {
        Self { repo, images }
    }

    pub async fn execute(
        &self,
        owner_id: UserId,
        mut input: CreatePublicationInput,
    ) -> PubResult<PublicationRecord> {
        let imagen = input.imagen.take();
        let validated =
            validate(input, Utc::now().date_naive()).map_err(PubError::Validation)?;

        // The image only hits the disk once every check has passed
        let imagen_url = match imagen {
            Some(pending) => Some(
                self.images
                    .store_pending(UploadKind::Publicaciones, &pending)
                    .await?,
            ),
            None => None,
        };

        let publication = Publication::new(
            validated.titulo,
            validated.descripcion,
            validated.lugar,
            validated.fecha,
            validated.tipo,
            validated.categoria,
            imagen_url,
            owner_id,
        );

        self.repo.create(&publication).await?;

        tracing::info!(publication_id = %publication.publication_id, "publication created");

        // Read back with the owner projection joined in
        self.repo
            .find_record(&publication.publication_id)
            .await?
            .ok_or_else(|| {
                PubError::Internal("publicación recién creada no encontrada".to_string())
            })
    }
}
