use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::errors::AccountError;
use crate::application::ports::FileStorage;
use crate::domain::repositories::UserRepository;

pub struct DeleteAccountUseCase {
    user_repository: Arc<dyn UserRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl DeleteAccountUseCase {
    pub fn new(user_repository: Arc<dyn UserRepository>, file_storage: Arc<dyn FileStorage>) -> Self {
        Self {
            user_repository,
            file_storage,
        }
    }

    /// Returns the number of documents that went with the account.
    #[instrument(skip(self))]
    pub async fn execute(&self, user_id: Uuid) -> Result<usize, AccountError> {
        let documents = self
            .user_repository
            .delete_with_content(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        for document in &documents {
            if let Err(e) = self.file_storage.delete_object(document.storage_key()).await {
                tracing::warn!(
                    document_id = %document.id(),
                    "Stored object left behind after account deletion: {}",
                    e
                );
            }
        }

        tracing::info!(documents = documents.len(), "Account deleted");
        Ok(documents.len())
    }
}
