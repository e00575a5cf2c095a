use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReadyEvent {
    pub doc_id: Uuid,
    pub file_name: String,
    pub class_name: String,
}

/// Pushed to a user's room. Serializes as `{"event": ..., "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    DocumentReady(DocumentReadyEvent),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::DocumentReady(_) => "document-ready",
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers to every live subscriber of the user's room and returns how
    /// many received it.
    async fn publish(&self, user_id: Uuid, event: ServerEvent) -> usize;
}
