//! Get Publication Use Case

use std::sync::Arc;

use kernel::id::PublicationId;

use crate::domain::repository::{PublicationRecord, PublicationRepository};
use crate::error::{PubError, PubResult};

/// Get publication use case
pub struct GetPublicationUseCase<R>
where
    R: PublicationRepository,
{
    repo: Arc<R>,
}

impl<R> GetPublicationUseCase<R>
where
    R: PublicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &PublicationId) -> PubResult<PublicationRecord> {
        self.repo
            .find_record(id)
            .await?
            .ok_or(PubError::NotFound)
    }
}
