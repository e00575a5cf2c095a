use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::errors::AccountError;
use crate::application::ports::FileStorage;
use crate::domain::entities::User;
use crate::domain::repositories::{DocumentRepository, UserRepository};
use crate::domain::value_objects::ClassName;

#[derive(Debug, Clone, Default)]
pub struct ClassRemoval {
    pub documents_removed: usize,
    pub chunks_removed: i64,
    pub sessions_removed: i64,
}

pub struct ManageClassesUseCase {
    user_repository: Arc<dyn UserRepository>,
    document_repository: Arc<dyn DocumentRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl ManageClassesUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        document_repository: Arc<dyn DocumentRepository>,
        file_storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            user_repository,
            document_repository,
            file_storage,
        }
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, AccountError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<String>, AccountError> {
        Ok(self.load_user(user_id).await?.classes().to_vec())
    }

    #[instrument(skip(self))]
    pub async fn add(&self, user_id: Uuid, name: &str) -> Result<Vec<String>, AccountError> {
        let class = ClassName::new(name).map_err(AccountError::Validation)?;
        let mut user = self.load_user(user_id).await?;

        if !self
            .user_repository
            .add_class(user_id, class.as_str())
            .await?
        {
            return Err(AccountError::ClassExists(class.into_inner()));
        }

        user.add_class(&class);
        Ok(user.classes().to_vec())
    }

    /// Drops the class together with its documents, their chunks and the chat
    /// sessions tied to either.
    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: Uuid, name: &str) -> Result<ClassRemoval, AccountError> {
        let user = self.load_user(user_id).await?;
        if !user.has_class(name) {
            return Err(AccountError::ClassNotFound(name.to_string()));
        }

        let purge = self.document_repository.delete_class(user_id, name).await?;

        self.user_repository.remove_class(user_id, name).await?;

        for document in &purge.documents {
            if let Err(e) = self.file_storage.delete_object(document.storage_key()).await {
                tracing::warn!(
                    document_id = %document.id(),
                    "Stored object left behind after class removal: {}",
                    e
                );
            }
        }

        tracing::info!(
            documents = purge.documents.len(),
            chunks = purge.chunks_removed,
            sessions = purge.sessions_removed,
            "Class removed"
        );

        Ok(ClassRemoval {
            documents_removed: purge.documents.len(),
            chunks_removed: purge.chunks_removed,
            sessions_removed: purge.sessions_removed,
        })
    }
}
