use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::entities::{ChatExchange, ChatSession};

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn insert(&self, session: &ChatSession) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatSession>, RepositoryError>;
    /// Most recently updated first.
    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<ChatSession>, RepositoryError>;
    /// Changes only the name. Returns `false` when the session is gone.
    async fn rename(&self, id: Uuid, name: &str) -> Result<bool, RepositoryError>;
    /// Appends the exchange to the stored messages while holding the row, so
    /// concurrent sends and renames are never overwritten. Returns the session
    /// as written, or `None` when it no longer exists.
    async fn append_exchange(
        &self,
        id: Uuid,
        exchange: ChatExchange,
    ) -> Result<Option<ChatSession>, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
