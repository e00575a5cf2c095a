use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub size: u64,
    pub content_type: Option<String>,
}

/// Object store holding the uploaded PDFs, addressed by document storage key.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: Option<&str>,
    ) -> Result<StoredObject, FileStorageError>;

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, FileStorageError>;

    /// Returns `false` when nothing was stored under the key.
    async fn delete_object(&self, key: &str) -> Result<bool, FileStorageError>;

    /// A URL the browser can open directly, or `None` when objects are only
    /// served through the download route.
    async fn object_url(&self, key: &str) -> Result<Option<String>, FileStorageError>;
}
