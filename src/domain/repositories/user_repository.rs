use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryError;
use crate::domain::entities::{Document, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Duplicate` when the email is already registered.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    /// Writes the account fields. The class list is left as stored.
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;
    /// Returns `false` when the class was already listed or the user is gone.
    async fn add_class(&self, id: Uuid, class_name: &str) -> Result<bool, RepositoryError>;
    async fn remove_class(&self, id: Uuid, class_name: &str) -> Result<bool, RepositoryError>;
    /// Removes the user with every document, chunk and chat session they own in
    /// one transaction. Returns the removed documents so their stored objects
    /// can be cleaned up, or `None` when the user did not exist.
    async fn delete_with_content(&self, id: Uuid) -> Result<Option<Vec<Document>>, RepositoryError>;
}
