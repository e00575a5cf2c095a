use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub class_name: String,
    pub storage_key: String,
    pub content_hash: String,
    pub file_size: i64,
    pub page_count: Option<i32>,
    pub is_processed: bool,
    pub ready_notified: bool,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Document> for DocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            user_id: document.user_id(),
            file_name: document.file_name().to_string(),
            class_name: document.class_name().to_string(),
            storage_key: document.storage_key().to_string(),
            content_hash: document.content_hash().to_string(),
            file_size: document.file_size(),
            page_count: document.page_count(),
            is_processed: document.is_processed(),
            ready_notified: document.ready_notified(),
            uploaded_at: document.uploaded_at(),
            updated_at: document.updated_at(),
        }
    }
}

impl From<DocumentModel> for Document {
    fn from(model: DocumentModel) -> Self {
        Document {
            id: model.id,
            user_id: model.user_id,
            file_name: model.file_name,
            class_name: model.class_name,
            storage_key: model.storage_key,
            content_hash: model.content_hash,
            file_size: model.file_size,
            page_count: model.page_count,
            is_processed: model.is_processed,
            ready_notified: model.ready_notified,
            uploaded_at: model.uploaded_at,
            updated_at: model.updated_at,
        }
    }
}
