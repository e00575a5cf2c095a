use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::errors::DocumentError;
use crate::application::ports::{FileStorage, IngestionJob, IngestionService};
use crate::application::services::inspect_pdf;
use crate::domain::entities::Document;
use crate::domain::repositories::{DocumentRepository, RepositoryError, UserRepository};
use crate::domain::value_objects::{ClassName, ContentDigest};

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct UploadDocumentRequest {
    pub user_id: Uuid,
    pub file_name: String,
    pub class_name: String,
    pub data: Vec<u8>,
}

pub struct UploadDocumentUseCase {
    user_repository: Arc<dyn UserRepository>,
    document_repository: Arc<dyn DocumentRepository>,
    file_storage: Arc<dyn FileStorage>,
    ingestion_service: Arc<dyn IngestionService>,
    free_document_limit: usize,
}

impl UploadDocumentUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        document_repository: Arc<dyn DocumentRepository>,
        file_storage: Arc<dyn FileStorage>,
        ingestion_service: Arc<dyn IngestionService>,
        free_document_limit: usize,
    ) -> Self {
        Self {
            user_repository,
            document_repository,
            file_storage,
            ingestion_service,
            free_document_limit,
        }
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id, file_name = %request.file_name))]
    pub async fn execute(&self, request: UploadDocumentRequest) -> Result<Document, DocumentError> {
        if request.file_name.trim().is_empty() {
            return Err(DocumentError::Validation("File name cannot be empty".into()));
        }
        if request.data.is_empty() {
            return Err(DocumentError::Validation("Uploaded file is empty".into()));
        }

        let class = ClassName::new(&request.class_name).map_err(DocumentError::Validation)?;
        let summary = inspect_pdf(&request.data).map_err(DocumentError::Validation)?;

        let user = self
            .user_repository
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| DocumentError::NotFound("User not found".into()))?;
        let limit = user.plan().document_limit(self.free_document_limit);

        // Fails fast before anything is stored; the insert re-checks under lock.
        let current = self.document_repository.count_for_user(user.id()).await?;
        if !user
            .plan()
            .allows_another_document(current.max(0) as usize, self.free_document_limit)
        {
            return Err(self.plan_limit());
        }

        let digest = ContentDigest::of(&request.data);
        if let Some(existing) = self
            .document_repository
            .find_by_hash(user.id(), class.as_str(), digest.as_str())
            .await?
        {
            return Err(duplicate_in_class(&class, existing.file_name()));
        }

        let document = Document::new(
            user.id(),
            &request.file_name,
            &class,
            &digest,
            request.data.len() as i64,
            summary.page_count,
        );

        self.file_storage
            .put_object(document.storage_key(), &request.data, Some(PDF_CONTENT_TYPE))
            .await?;

        let inserted = self
            .document_repository
            .insert_within_limit(&document, limit)
            .await;
        let failure = match inserted {
            Ok(true) => None,
            Ok(false) => Some(self.plan_limit()),
            Err(RepositoryError::Duplicate(_)) => {
                Some(duplicate_in_class(&class, document.file_name()))
            }
            Err(e) => Some(e.into()),
        };
        if let Some(err) = failure {
            if let Err(cleanup) = self.file_storage.delete_object(document.storage_key()).await {
                tracing::warn!("Failed to remove orphaned upload {}: {}", document.storage_key(), cleanup);
            }
            return Err(err);
        }

        if let Err(e) = self
            .user_repository
            .add_class(user.id(), class.as_str())
            .await
        {
            tracing::warn!("Document stored but class list not updated: {}", e);
        }

        tracing::info!(
            document_id = %document.id(),
            class_name = %document.class_name(),
            size = document.file_size(),
            "Document uploaded"
        );

        self.dispatch_ingestion(&document);
        Ok(document)
    }

    fn plan_limit(&self) -> DocumentError {
        DocumentError::PlanLimit {
            limit: self.free_document_limit,
        }
    }

    /// Hands the stored file to the ingestion pipeline without waiting for it.
    fn dispatch_ingestion(&self, document: &Document) {
        let job = IngestionJob {
            user_id: document.user_id(),
            class_name: document.class_name().to_string(),
            s3_key: document.storage_key().to_string(),
            doc_id: document.id(),
        };
        let ingestion = Arc::clone(&self.ingestion_service);

        tokio::spawn(async move {
            match ingestion.process_upload(&job).await {
                Ok(()) => tracing::info!(document_id = %job.doc_id, "Ingestion accepted"),
                Err(e) => tracing::error!(document_id = %job.doc_id, "Ingestion request failed: {}", e),
            }
        });
    }
}

fn duplicate_in_class(class: &ClassName, file_name: &str) -> DocumentError {
    DocumentError::Duplicate(format!(
        "This file is already in '{}' as '{}'",
        class, file_name
    ))
}
