use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::errors::DocumentError;
use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, RepositoryError, UserRepository};
use crate::domain::value_objects::ClassName;

pub struct MoveDocumentUseCase {
    user_repository: Arc<dyn UserRepository>,
    document_repository: Arc<dyn DocumentRepository>,
}

impl MoveDocumentUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        document_repository: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            user_repository,
            document_repository,
        }
    }

    /// Reassigns the document and its chunks to another class.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        user_id: Uuid,
        document_id: Uuid,
        class_name: &str,
    ) -> Result<Document, DocumentError> {
        let class = ClassName::new(class_name).map_err(DocumentError::Validation)?;

        let mut document = self
            .document_repository
            .find_by_id(document_id)
            .await?
            .filter(|d| d.belongs_to(user_id))
            .ok_or_else(|| DocumentError::NotFound("Document not found".into()))?;

        if document.class_name() == class.as_str() {
            return Ok(document);
        }

        let moved = self
            .document_repository
            .update_class(document_id, class.as_str())
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(_) => DocumentError::Duplicate(format!(
                    "'{}' already holds a copy of '{}'",
                    class,
                    document.file_name()
                )),
                other => DocumentError::from(other),
            })?;
        if !moved {
            return Err(DocumentError::NotFound("Document not found".into()));
        }
        document.move_to_class(&class);

        self.user_repository
            .add_class(user_id, class.as_str())
            .await?;

        Ok(document)
    }
}
