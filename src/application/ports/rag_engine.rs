use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::HistoryEntry;
use crate::domain::value_objects::SourceChunk;

#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("Could not start answer engine: {0}")]
    Spawn(String),
    #[error("Answer engine timed out after {0}s")]
    Timeout(u64),
    #[error("Answer engine exited with {code:?}: {stderr}")]
    ProcessFailed { code: Option<i32>, stderr: String },
    #[error("Answer engine returned unusable output: {0}")]
    InvalidOutput(String),
}

#[derive(Debug, Clone)]
pub struct RagQuery {
    pub user_id: Uuid,
    pub message: String,
    pub history: Vec<HistoryEntry>,
    pub class_name: Option<String>,
    pub document_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct RagAnswer {
    pub message: String,
    pub sources: Vec<SourceChunk>,
}

/// Retrieval-augmented answer generation over a user's documents.
#[async_trait]
pub trait RagEngine: Send + Sync {
    async fn answer(&self, query: RagQuery) -> Result<RagAnswer, RagError>;
}
