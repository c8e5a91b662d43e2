//! Request / Response DTOs
//!
//! Every publication leaves the API with its owner expanded to the public
//! projection {id, nombre, email}; list responses always carry the
//! pagination envelope, zero results included.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::PublicationPage;
use crate::domain::repository::{PublicationOwner, PublicationRecord};
use crate::domain::value_object::{Category, PublicationStatus, PublicationType};

/// List query parameters. `page` and `limit` stay raw strings here so a
/// non-numeric value reaches the use case and gets the accumulated JSON
/// 400 instead of a deserializer rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub tipo: Option<String>,
    pub categoria: Option<String>,
    pub estado: Option<String>,
    pub usuario_id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Public owner projection
#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
}

impl From<&PublicationOwner> for OwnerResponse {
    fn from(owner: &PublicationOwner) -> Self {
        Self {
            id: owner.id,
            nombre: owner.nombre.clone(),
            email: owner.email.clone(),
        }
    }
}

/// Publication with its owner expanded
#[derive(Debug, Serialize)]
pub struct PublicationResponse {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: String,
    pub lugar: String,
    pub fecha: NaiveDate,
    pub estado: PublicationStatus,
    pub tipo: PublicationType,
    pub categoria: Category,
    pub imagen_url: Option<String>,
    pub usuario: OwnerResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PublicationRecord> for PublicationResponse {
    fn from(record: &PublicationRecord) -> Self {
        let publication = &record.publication;
        Self {
            id: publication.publication_id.into_uuid(),
            titulo: publication.titulo.clone(),
            descripcion: publication.descripcion.clone(),
            lugar: publication.lugar.clone(),
            fecha: publication.fecha,
            estado: publication.estado,
            tipo: publication.tipo,
            categoria: publication.categoria,
            imagen_url: publication.imagen_url.clone(),
            usuario: OwnerResponse::from(&record.owner),
            created_at: publication.created_at,
            updated_at: publication.updated_at,
        }
    }
}

/// Pagination envelope numbers
#[derive(Debug, Serialize)]
pub struct PaginationResponse {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

/// List response: records plus the envelope, even when empty
#[derive(Debug, Serialize)]
pub struct PublicationListResponse {
    pub publicaciones: Vec<PublicationResponse>,
    pub pagination: PaginationResponse,
}

impl From<&PublicationPage> for PublicationListResponse {
    fn from(page: &PublicationPage) -> Self {
        Self {
            publicaciones: page.records.iter().map(PublicationResponse::from).collect(),
            pagination: PaginationResponse {
                page: page.page,
                limit: page.limit,
                total: page.total,
                pages: page.pages,
            },
        }
    }
}
