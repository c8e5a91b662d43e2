//! PostgreSQL Repository Implementation
//!
//! The list query is the one place dynamic SQL is needed; the filters are
//! assembled with `QueryBuilder` and every value goes through a bind.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{PublicationId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::publication::Publication;
use crate::domain::repository::{
    PageRequest, PublicationFilter, PublicationOwner, PublicationRecord, PublicationRepository,
};
use crate::domain::value_object::{Category, PublicationStatus, PublicationType};
use crate::error::{PubError, PubResult};

const RECORD_COLUMNS: &str = "p.id, p.titulo, p.descripcion, p.lugar, p.fecha, p.estado, \
     p.tipo, p.categoria, p.imagen_url, p.owner_id, p.created_at, p.updated_at, \
     u.nombre AS owner_nombre, u.email AS owner_email";

/// PostgreSQL-backed publication repository
#[derive(Clone)]
pub struct PgPublicationRepository {
    pool: PgPool,
}

impl PgPublicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PublicationRepository for PgPublicationRepository {
    async fn create(&self, publication: &Publication) -> PubResult<()> {
        sqlx::query(
            r#"
            INSERT INTO publicaciones (
                id,
                titulo,
                descripcion,
                lugar,
                fecha,
                estado,
                tipo,
                categoria,
                imagen_url,
                owner_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(publication.publication_id.as_uuid())
        .bind(&publication.titulo)
        .bind(&publication.descripcion)
        .bind(&publication.lugar)
        .bind(publication.fecha)
        .bind(publication.estado.as_str())
        .bind(publication.tipo.as_str())
        .bind(publication.categoria.as_str())
        .bind(&publication.imagen_url)
        .bind(publication.owner_id.as_uuid())
        .bind(publication.created_at)
        .bind(publication.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PublicationId) -> PubResult<Option<Publication>> {
        let row = sqlx::query_as::<_, PublicationRow>(
            r#"
            SELECT id, titulo, descripcion, lugar, fecha, estado, tipo,
                   categoria, imagen_url, owner_id, created_at, updated_at
            FROM publicaciones
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PublicationRow::into_publication).transpose()
    }

    async fn find_record(&self, id: &PublicationId) -> PubResult<Option<PublicationRecord>> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} \
             FROM publicaciones p \
             JOIN usuarios u ON u.id = p.owner_id \
             WHERE p.id = $1"
        );

        let row = sqlx::query_as::<_, PublicationRecordRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PublicationRecordRow::into_record).transpose()
    }

    async fn list(
        &self,
        filter: &PublicationFilter,
        page: &PageRequest,
    ) -> PubResult<(Vec<PublicationRecord>, u64)> {
        let mut count_query =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM publicaciones p");
        push_filters(&mut count_query, filter);

        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {RECORD_COLUMNS} \
             FROM publicaciones p \
             JOIN usuarios u ON u.id = p.owner_id"
        ));
        push_filters(&mut query, filter);
        query.push(" ORDER BY p.created_at DESC LIMIT ");
        query.push_bind(i64::from(page.limit()));
        query.push(" OFFSET ");
        query.push_bind(page.offset() as i64);

        let rows = query
            .build_query_as::<PublicationRecordRow>()
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .into_iter()
            .map(PublicationRecordRow::into_record)
            .collect::<PubResult<Vec<_>>>()?;

        Ok((records, total as u64))
    }

    async fn update(&self, publication: &Publication) -> PubResult<()> {
        sqlx::query(
            r#"
            UPDATE publicaciones SET
                titulo = $2,
                descripcion = $3,
                lugar = $4,
                fecha = $5,
                estado = $6,
                tipo = $7,
                categoria = $8,
                imagen_url = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(publication.publication_id.as_uuid())
        .bind(&publication.titulo)
        .bind(&publication.descripcion)
        .bind(&publication.lugar)
        .bind(publication.fecha)
        .bind(publication.estado.as_str())
        .bind(publication.tipo.as_str())
        .bind(publication.categoria.as_str())
        .bind(&publication.imagen_url)
        .bind(publication.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_all(&self) -> PubResult<u64> {
        let deleted = sqlx::query("DELETE FROM publicaciones")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

/// Append the AND-combined equality filters, each value bound
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &PublicationFilter) {
    let mut sep = " WHERE ";

    if let Some(tipo) = filter.tipo {
        query.push(sep).push("p.tipo = ").push_bind(tipo.as_str());
        sep = " AND ";
    }
    if let Some(categoria) = filter.categoria {
        query
            .push(sep)
            .push("p.categoria = ")
            .push_bind(categoria.as_str());
        sep = " AND ";
    }
    if let Some(estado) = filter.estado {
        query
            .push(sep)
            .push("p.estado = ")
            .push_bind(estado.as_str());
        sep = " AND ";
    }
    if let Some(usuario_id) = filter.usuario_id {
        query
            .push(sep)
            .push("p.owner_id = ")
            .push_bind(usuario_id.into_uuid());
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PublicationRow {
    id: Uuid,
    titulo: String,
    descripcion: String,
    lugar: String,
    fecha: NaiveDate,
    estado: String,
    tipo: String,
    categoria: String,
    imagen_url: Option<String>,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PublicationRow {
    // The enum columns are CHECK-constrained, so a parse failure here is
    // corrupted data, not client input
    fn into_publication(self) -> PubResult<Publication> {
        Ok(Publication {
            publication_id: PublicationId::from_uuid(self.id),
            titulo: self.titulo,
            descripcion: self.descripcion,
            lugar: self.lugar,
            fecha: self.fecha,
            estado: PublicationStatus::parse(&self.estado).map_err(PubError::Internal)?,
            tipo: PublicationType::parse(&self.tipo).map_err(PubError::Internal)?,
            categoria: Category::parse(&self.categoria).map_err(PubError::Internal)?,
            imagen_url: self.imagen_url,
            owner_id: UserId::from_uuid(self.owner_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PublicationRecordRow {
    #[sqlx(flatten)]
    publication: PublicationRow,
    owner_nombre: String,
    owner_email: String,
}

impl PublicationRecordRow {
    fn into_record(self) -> PubResult<PublicationRecord> {
        let owner = PublicationOwner {
            id: self.publication.owner_id,
            nombre: self.owner_nombre,
            email: self.owner_email,
        };

        Ok(PublicationRecord {
            publication: self.publication.into_publication()?,
            owner,
        })
    }
}
