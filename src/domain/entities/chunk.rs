use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A slice of a document written by the external ingestion pipeline. The
/// embedding column is never read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub(crate) id: Uuid,
    pub(crate) user_id: Uuid,
    pub(crate) document_id: Uuid,
    pub(crate) class_name: String,
    pub(crate) page_number: i32,
    pub(crate) text: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl Chunk {
    pub fn new(
        user_id: Uuid,
        document_id: Uuid,
        class_name: String,
        page_number: i32,
        text: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            document_id,
            class_name,
            page_number,
            text,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn page_number(&self) -> i32 {
        self.page_number
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn belongs_to(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
