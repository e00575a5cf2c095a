use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Document;

/// Where the browser can open a document when the store has no direct URL.
pub fn download_path(document_id: Uuid) -> String {
    format!("/api/v1/download/{}", document_id)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub file_name: String,
    pub class_name: String,
    pub file_size: i64,
    pub page_count: Option<i32>,
    pub is_processed: bool,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Document> for DocumentResponseDto {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            file_name: document.file_name().to_string(),
            class_name: document.class_name().to_string(),
            file_size: document.file_size(),
            page_count: document.page_count(),
            is_processed: document.is_processed(),
            uploaded_at: document.uploaded_at(),
            updated_at: document.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentDetailDto {
    #[serde(flatten)]
    pub document: DocumentResponseDto,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentListDto {
    pub documents: Vec<DocumentResponseDto>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct DocumentQueryDto {
    pub class: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDocumentRequestDto {
    pub class_name: String,
}
