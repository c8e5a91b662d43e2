//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer. Reads return the owner projection joined in, so handlers never
//! have to touch the user store.

use kernel::id::{PublicationId, UserId};
use uuid::Uuid;

use crate::domain::entity::publication::Publication;
use crate::domain::value_object::{Category, PublicationStatus, PublicationType};
use crate::error::PubResult;

/// Public projection of the owning user. Deliberately has no room for
/// the credential hash.
#[derive(Debug, Clone)]
pub struct PublicationOwner {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
}

/// A publication together with its owner projection
#[derive(Debug, Clone)]
pub struct PublicationRecord {
    pub publication: Publication,
    pub owner: PublicationOwner,
}

/// Equality filters for the list query. Absent fields are unconstrained;
/// present fields are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct PublicationFilter {
    pub tipo: Option<PublicationType>,
    pub categoria: Option<Category>,
    pub estado: Option<PublicationStatus>,
    pub usuario_id: Option<UserId>,
}

/// Bounded page request. Construction clamps rather than rejects.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 50;
    pub const MAX_LIMIT: u32 = 100;

    /// Clamp raw values: page at least 1, limit within 1..=100
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Total page count for `total` matching rows
    pub fn pages_for(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Publication repository trait
#[trait_variant::make(PublicationRepository: Send)]
pub trait LocalPublicationRepository {
    /// Create a new publication
    async fn create(&self, publication: &Publication) -> PubResult<()>;

    /// Find publication by ID, without the owner projection
    async fn find_by_id(&self, id: &PublicationId) -> PubResult<Option<Publication>>;

    /// Find publication by ID with the owner joined in
    async fn find_record(&self, id: &PublicationId) -> PubResult<Option<PublicationRecord>>;

    /// List one page of filtered publications (newest first) together
    /// with the total count of matching rows
    async fn list(
        &self,
        filter: &PublicationFilter,
        page: &PageRequest,
    ) -> PubResult<(Vec<PublicationRecord>, u64)>;

    /// Update publication (full row; partial semantics are applied on the entity)
    async fn update(&self, publication: &Publication) -> PubResult<()>;

    /// Delete every publication. Test-only reset support.
    async fn delete_all(&self) -> PubResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let page = PageRequest::new(None, None);
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 50);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_limit_clamped_both_ways() {
        assert_eq!(PageRequest::new(None, Some(200)).limit(), 100);
        assert_eq!(PageRequest::new(None, Some(0)).limit(), 1);
        assert_eq!(PageRequest::new(None, Some(75)).limit(), 75);
    }

    #[test]
    fn test_page_floor_is_one() {
        assert_eq!(PageRequest::new(Some(0), None).page(), 1);
        assert_eq!(PageRequest::new(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn test_pages_for_count() {
        let page = PageRequest::new(None, Some(50));
        assert_eq!(page.pages_for(0), 0);
        assert_eq!(page.pages_for(50), 1);
        assert_eq!(page.pages_for(51), 2);
        assert_eq!(page.pages_for(101), 3);
    }
}
