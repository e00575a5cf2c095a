use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::errors::DocumentError;
use crate::application::ports::FileStorage;
use crate::domain::repositories::DocumentRepository;

pub struct DeleteDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl DeleteDocumentUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        file_storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            document_repository,
            file_storage,
        }
    }

    /// Removes the document, its chunks and any chat session pinned to it.
    #[instrument(skip(self))]
    pub async fn execute(&self, user_id: Uuid, document_id: Uuid) -> Result<(), DocumentError> {
        let document = self
            .document_repository
            .find_by_id(document_id)
            .await?
            .filter(|d| d.belongs_to(user_id))
            .ok_or_else(|| DocumentError::NotFound("Document not found".into()))?;

        if !self
            .document_repository
            .delete_with_dependents(document_id)
            .await?
        {
            return Err(DocumentError::NotFound("Document not found".into()));
        }

        match self.file_storage.delete_object(document.storage_key()).await {
            Ok(true) => {}
            Ok(false) => tracing::debug!("No stored object under {}", document.storage_key()),
            Err(e) => tracing::warn!("Stored object left behind for {}: {}", document_id, e),
        }

        tracing::info!("Document deleted");
        Ok(())
    }
}
