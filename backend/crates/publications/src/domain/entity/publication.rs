//! Publication Entity
//!
//! A lost-or-found post. The owner is fixed at creation from the session
//! and never changes; the resolution state always starts "No resuelto".

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{PublicationId, UserId};

use crate::domain::value_object::{Category, PublicationStatus, PublicationType};

/// Publication entity
#[derive(Debug, Clone)]
pub struct Publication {
    /// Internal UUID identifier
    pub publication_id: PublicationId,
    /// Title (at least 3 characters)
    pub titulo: String,
    /// Description (at least 10 characters)
    pub descripcion: String,
    /// Where the item was lost or found
    pub lugar: String,
    /// Calendar date of the event, never in the future
    pub fecha: NaiveDate,
    /// Resolution state
    pub estado: PublicationStatus,
    /// Lost or found
    pub tipo: PublicationType,
    /// Item category
    pub categoria: Category,
    /// Optional image URL path
    pub imagen_url: Option<String>,
    /// Owning user, taken from the session at creation
    pub owner_id: UserId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Publication {
    /// Create a new publication. The state is not a parameter: every
    /// publication starts unresolved.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        titulo: String,
        descripcion: String,
        lugar: String,
        fecha: NaiveDate,
        tipo: PublicationType,
        categoria: Category,
        imagen_url: Option<String>,
        owner_id: UserId,
    ) -> Self {
        let now = Utc::now();

        Self {
            publication_id: PublicationId::new(),
            titulo,
            descripcion,
            lugar,
            fecha,
            estado: PublicationStatus::NoResuelto,
            tipo,
            categoria,
            imagen_url,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the last-modified timestamp after a mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Publication {
        Publication::new(
            "Billetera perdida".to_string(),
            "Billetera de cuero marrón con documentos".to_string(),
            "Plaza Independencia".to_string(),
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            PublicationType::Perdido,
            Category::Documentos,
            None,
            UserId::new(),
        )
    }

    #[test]
    fn test_new_publication_starts_unresolved() {
        assert_eq!(sample().estado, PublicationStatus::NoResuelto);
    }

    #[test]
    fn test_touch_advances_updated_at() {
        let mut publication = sample();
        let before = publication.updated_at;
        publication.touch();
        assert!(publication.updated_at >= before);
        assert_eq!(publication.created_at, before);
    }
}
