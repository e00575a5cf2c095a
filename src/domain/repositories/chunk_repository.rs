use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::entities::Chunk;

/// Read side of the chunk collection the ingestion pipeline fills.
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chunk>, RepositoryError>;
    async fn count_by_document(&self, document_id: Uuid) -> Result<i64, RepositoryError>;
}
