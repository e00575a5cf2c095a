use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::entities::Document;

/// Outcome of removing a class and everything grouped under it.
#[derive(Debug, Clone, Default)]
pub struct ClassPurge {
    pub documents: Vec<Document>,
    pub chunks_removed: i64,
    pub sessions_removed: i64,
}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Inserts the document unless its owner already holds `limit` documents,
    /// in which case nothing is written and `false` is returned. Uploads of the
    /// same user are serialized so the count cannot be overtaken. Fails with
    /// `Duplicate` when the class already holds identical content.
    async fn insert_within_limit(
        &self,
        document: &Document,
        limit: Option<usize>,
    ) -> Result<bool, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, RepositoryError>;
    /// Newest first, optionally restricted to one class.
    async fn find_for_user(
        &self,
        user_id: Uuid,
        class_name: Option<&str>,
    ) -> Result<Vec<Document>, RepositoryError>;
    async fn count_for_user(&self, user_id: Uuid) -> Result<i64, RepositoryError>;
    async fn find_by_hash(
        &self,
        user_id: Uuid,
        class_name: &str,
        content_hash: &str,
    ) -> Result<Option<Document>, RepositoryError>;
    /// Moves the document and its chunks to another class. Fails with
    /// `Duplicate` when the target class already holds identical content.
    async fn update_class(&self, id: Uuid, class_name: &str) -> Result<bool, RepositoryError>;
    /// Deletes the document, its chunks and the chat sessions assigned to it in
    /// one transaction.
    async fn delete_with_dependents(&self, id: Uuid) -> Result<bool, RepositoryError>;
    /// Deletes every document of the class with their chunks, plus chat
    /// sessions assigned to the class or to one of those documents.
    async fn delete_class(
        &self,
        user_id: Uuid,
        class_name: &str,
    ) -> Result<ClassPurge, RepositoryError>;
    /// Processed documents whose ready event has not been pushed yet, oldest
    /// upload first.
    async fn find_awaiting_ready_notice(&self, limit: i64) -> Result<Vec<Document>, RepositoryError>;
    async fn mark_ready_notified(&self, ids: &[Uuid]) -> Result<usize, RepositoryError>;
}
