use std::sync::Arc;
use uuid::Uuid;

use crate::application::errors::AccountError;
use crate::domain::entities::User;
use crate::domain::repositories::{DocumentRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct UserOverview {
    pub user: User,
    pub document_count: i64,
    pub document_limit: Option<usize>,
}

pub struct GetCurrentUserUseCase {
    user_repository: Arc<dyn UserRepository>,
    document_repository: Arc<dyn DocumentRepository>,
    free_document_limit: usize,
}

impl GetCurrentUserUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        document_repository: Arc<dyn DocumentRepository>,
        free_document_limit: usize,
    ) -> Self {
        Self {
            user_repository,
            document_repository,
            free_document_limit,
        }
    }

    pub async fn execute(&self, user_id: Uuid) -> Result<UserOverview, AccountError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let document_count = self.document_repository.count_for_user(user_id).await?;
        let document_limit = user.plan().document_limit(self.free_document_limit);

        Ok(UserOverview {
            user,
            document_count,
            document_limit,
        })
    }
}
