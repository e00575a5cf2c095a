use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// Body of the ingestion service's `process_upload` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestionJob {
    pub user_id: Uuid,
    pub class_name: String,
    pub s3_key: String,
    pub doc_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Ingestion service answered {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

/// External pipeline that chunks and embeds an uploaded document, then flags
/// it processed.
#[async_trait]
pub trait IngestionService: Send + Sync {
    async fn process_upload(&self, job: &IngestionJob) -> Result<(), IngestionError>;
}
