use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ClassName, ContentDigest};

const MAX_STORED_NAME_CHARS: usize = 128;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub(crate) id: Uuid,
    pub(crate) user_id: Uuid,
    pub(crate) file_name: String,
    pub(crate) class_name: String,
    pub(crate) storage_key: String,
    pub(crate) content_hash: String,
    pub(crate) file_size: i64,
    pub(crate) page_count: Option<i32>,
    pub(crate) is_processed: bool,
    pub(crate) ready_notified: bool,
    pub(crate) uploaded_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        user_id: Uuid,
        file_name: &str,
        class_name: &ClassName,
        content_hash: &ContentDigest,
        file_size: i64,
        page_count: Option<i32>,
    ) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let display_name = file_name.trim().to_string();

        Self {
            id,
            user_id,
            storage_key: storage_key_for(user_id, id, &display_name),
            file_name: display_name,
            class_name: class_name.as_str().to_string(),
            content_hash: content_hash.as_str().to_string(),
            file_size,
            page_count,
            is_processed: false,
            ready_notified: false,
            uploaded_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    pub fn page_count(&self) -> Option<i32> {
        self.page_count
    }

    pub fn is_processed(&self) -> bool {
        self.is_processed
    }

    pub fn ready_notified(&self) -> bool {
        self.ready_notified
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn belongs_to(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Processed by the ingestion pipeline but nobody was told yet.
    pub fn awaits_ready_notice(&self) -> bool {
        self.is_processed && !self.ready_notified
    }

    pub fn mark_processed(&mut self) {
        self.is_processed = true;
        self.updated_at = Utc::now();
    }

    pub fn mark_ready_notified(&mut self) {
        self.ready_notified = true;
        self.updated_at = Utc::now();
    }

    pub fn move_to_class(&mut self, class_name: &ClassName) {
        self.class_name = class_name.as_str().to_string();
        self.updated_at = Utc::now();
    }
}

/// Object key under which the uploaded bytes are stored.
pub fn storage_key_for(user_id: Uuid, document_id: Uuid, file_name: &str) -> String {
    format!("{}/{}/{}", user_id, document_id, sanitize_file_name(file_name))
}

fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STORED_NAME_CHARS)
        .collect();

    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "document.pdf".to_string()
    } else {
        cleaned
    }
}
