use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};

use crate::application::ports::{FileStorage, FileStorageError, StoredObject};
use crate::config::S3Config;

/// S3 (or S3-compatible) bucket holding the uploaded PDFs. The ingestion
/// pipeline reads from the same bucket using the document's storage key.
pub struct S3FileStorage {
    bucket: Box<Bucket>,
    url_expiry_secs: u32,
}

fn backend_error(err: S3Error) -> FileStorageError {
    FileStorageError::Backend(err.to_string())
}

fn is_not_found(status: u16) -> bool {
    status == 404
}

impl S3FileStorage {
    pub fn new(config: &S3Config) -> Result<Self, FileStorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| FileStorageError::Backend(format!("Invalid region: {}", e)))?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| FileStorageError::Backend(format!("Invalid credentials: {}", e)))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials).map_err(backend_error)?;
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            url_expiry_secs: config.url_expiry_secs,
        })
    }
}

#[async_trait]
impl FileStorage for S3FileStorage {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: Option<&str>,
    ) -> Result<StoredObject, FileStorageError> {
        let content_type = content_type.unwrap_or("application/octet-stream");
        let response = self
            .bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(backend_error)?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(FileStorageError::Backend(format!(
                "PUT {} answered {}",
                key, status
            )));
        }

        Ok(StoredObject {
            key: key.to_string(),
            size: data.len() as u64,
            content_type: Some(content_type.to_string()),
        })
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, FileStorageError> {
        let response = match self.bucket.get_object(key).await {
            Ok(response) => response,
            Err(S3Error::HttpFailWithBody(status, _)) if is_not_found(status) => {
                return Err(FileStorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(backend_error(e)),
        };

        match response.status_code() {
            200..=299 => Ok(response.bytes().to_vec()),
            status if is_not_found(status) => Err(FileStorageError::NotFound(key.to_string())),
            status => Err(FileStorageError::Backend(format!(
                "GET {} answered {}",
                key, status
            ))),
        }
    }

    async fn delete_object(&self, key: &str) -> Result<bool, FileStorageError> {
        match self.bucket.head_object(key).await {
            Ok((_, status)) if is_not_found(status) => return Ok(false),
            Ok(_) => {}
            Err(S3Error::HttpFailWithBody(status, _)) if is_not_found(status) => return Ok(false),
            Err(e) => return Err(backend_error(e)),
        }

        let response = self.bucket.delete_object(key).await.map_err(backend_error)?;
        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(FileStorageError::Backend(format!(
                "DELETE {} answered {}",
                key, status
            )));
        }
        Ok(true)
    }

    async fn object_url(&self, key: &str) -> Result<Option<String>, FileStorageError> {
        let url = self
            .bucket
            .presign_get(key, self.url_expiry_secs, None)
            .await
            .map_err(backend_error)?;
        Ok(Some(url))
    }
}
