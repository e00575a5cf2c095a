use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Chunk;
use crate::infrastructure::database::schema::chunks;

/// Chunk row without its embedding, which only the retrieval side reads.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChunkModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_id: Uuid,
    pub class_name: String,
    pub page_number: i32,
    pub chunk_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChunkModel> for Chunk {
    fn from(model: ChunkModel) -> Self {
        Chunk {
            id: model.id,
            user_id: model.user_id,
            document_id: model.document_id,
            class_name: model.class_name,
            page_number: model.page_number,
            text: model.chunk_text,
            created_at: model.created_at,
        }
    }
}
