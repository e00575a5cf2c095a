use std::sync::Arc;
use uuid::Uuid;

use crate::application::errors::DocumentError;
use crate::application::ports::{FileStorage, FileStorageError};
use crate::domain::repositories::DocumentRepository;

#[derive(Debug, Clone)]
pub struct DownloadedDocument {
    pub file_name: String,
    pub data: Vec<u8>,
}

pub struct DownloadDocumentUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl DownloadDocumentUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        file_storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            document_repository,
            file_storage,
        }
    }

    pub async fn execute(
        &self,
        user_id: Uuid,
        document_id: Uuid,
    ) -> Result<DownloadedDocument, DocumentError> {
        let document = self
            .document_repository
            .find_by_id(document_id)
            .await?
            .filter(|d| d.belongs_to(user_id))
            .ok_or_else(|| DocumentError::NotFound("Document not found".into()))?;

        let data = self
            .file_storage
            .get_object(document.storage_key())
            .await
            .map_err(|e| match e {
                FileStorageError::NotFound(_) => {
                    DocumentError::NotFound("Document file is missing from storage".into())
                }
                other => DocumentError::Storage(other),
            })?;

        Ok(DownloadedDocument {
            file_name: document.file_name().to_string(),
            data,
        })
    }
}
