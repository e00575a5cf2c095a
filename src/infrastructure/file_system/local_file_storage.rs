use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{FileStorage, FileStorageError, StoredObject};

/// Keeps objects on local disk under `base_path`, one file per key. Used in
/// development and tests; downloads go through the API.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(self.base_path.join(".tmp"))
            .await
            .map_err(|e| FileStorageError::Io(e.to_string()))
    }

    /// Maps a key onto a path below the base directory, refusing anything that
    /// could escape it.
    fn object_path(&self, key: &str) -> Result<PathBuf, FileStorageError> {
        if key.is_empty() || key.contains('\\') || key.contains('\0') {
            return Err(FileStorageError::InvalidKey(key.to_string()));
        }

        let relative = Path::new(key);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(part) if part != ".tmp"));
        if !safe {
            return Err(FileStorageError::InvalidKey(key.to_string()));
        }

        Ok(self.base_path.join(relative))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join(".tmp").join(Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: Option<&str>,
    ) -> Result<StoredObject, FileStorageError> {
        let path = self.object_path(key)?;
        self.ensure_directory_exists().await?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileStorageError::Io(e.to_string()))?;
        }

        // Write then rename so readers never see a partial file.
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(FileStorageError::Io(e.to_string()));
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(FileStorageError::Io(e.to_string()));
        }

        Ok(StoredObject {
            key: key.to_string(),
            size: data.len() as u64,
            content_type: content_type.map(|s| s.to_string()),
        })
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, FileStorageError> {
        let path = self.object_path(key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FileStorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(FileStorageError::Io(e.to_string())),
        }
    }

    async fn delete_object(&self, key: &str) -> Result<bool, FileStorageError> {
        let path = self.object_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(FileStorageError::Io(e.to_string())),
        }

        // Drop the now empty per-document directories; failures are harmless.
        let mut dir = path.parent();
        while let Some(current) = dir {
            if current == self.base_path || fs::remove_dir(current).await.is_err() {
                break;
            }
            dir = current.parent();
        }

        Ok(true)
    }

    async fn object_url(&self, _key: &str) -> Result<Option<String>, FileStorageError> {
        Ok(None)
    }
}
