use std::sync::Arc;
use uuid::Uuid;

use crate::application::errors::DocumentError;
use crate::application::ports::FileStorage;
use crate::domain::entities::{Chunk, Document};
use crate::domain::repositories::{ChunkRepository, DocumentRepository};

/// Where a citation leads: the chunk text plus the document and page to open.
#[derive(Debug, Clone)]
pub struct CitationTarget {
    pub chunk: Chunk,
    pub document: Document,
    pub url: Option<String>,
}

pub struct ResolveCitationUseCase {
    chunk_repository: Arc<dyn ChunkRepository>,
    document_repository: Arc<dyn DocumentRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl ResolveCitationUseCase {
    pub fn new(
        chunk_repository: Arc<dyn ChunkRepository>,
        document_repository: Arc<dyn DocumentRepository>,
        file_storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            chunk_repository,
            document_repository,
            file_storage,
        }
    }

    pub async fn execute(&self, user_id: Uuid, chunk_id: Uuid) -> Result<CitationTarget, DocumentError> {
        let chunk = self
            .chunk_repository
            .find_by_id(chunk_id)
            .await?
            .filter(|c| c.belongs_to(user_id))
            .ok_or_else(|| DocumentError::NotFound("Source not found".into()))?;

        let document = self
            .document_repository
            .find_by_id(chunk.document_id())
            .await?
            .filter(|d| d.belongs_to(user_id))
            .ok_or_else(|| DocumentError::NotFound("Source document no longer exists".into()))?;

        let url = self.file_storage.object_url(document.storage_key()).await?;

        Ok(CitationTarget {
            chunk,
            document,
            url,
        })
    }
}
