use std::sync::Arc;
use uuid::Uuid;

use crate::application::errors::DocumentError;
use crate::application::ports::FileStorage;
use crate::domain::entities::Document;
use crate::domain::repositories::DocumentRepository;

#[derive(Debug, Clone)]
pub struct DocumentView {
    pub document: Document,
    pub url: Option<String>,
}

pub struct ListDocumentsUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl ListDocumentsUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        file_storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            document_repository,
            file_storage,
        }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        class_name: Option<&str>,
    ) -> Result<Vec<Document>, DocumentError> {
        let class_name = class_name.map(str::trim).filter(|c| !c.is_empty());
        Ok(self
            .document_repository
            .find_for_user(user_id, class_name)
            .await?)
    }

    pub async fn get(&self, user_id: Uuid, document_id: Uuid) -> Result<DocumentView, DocumentError> {
        let document = self
            .document_repository
            .find_by_id(document_id)
            .await?
            .filter(|d| d.belongs_to(user_id))
            .ok_or_else(|| DocumentError::NotFound("Document not found".into()))?;

        let url = self.file_storage.object_url(document.storage_key()).await?;
        Ok(DocumentView { document, url })
    }
}
