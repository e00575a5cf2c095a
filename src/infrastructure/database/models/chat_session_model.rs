use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ChatSession;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::schema::chat_sessions;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatSessionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub assigned_class: Option<String>,
    pub assigned_document: Option<Uuid>,
    pub messages: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatSessionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub assigned_class: Option<String>,
    pub assigned_document: Option<Uuid>,
    pub messages: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&ChatSession> for NewChatSessionModel {
    type Error = RepositoryError;

    fn try_from(session: &ChatSession) -> Result<Self, Self::Error> {
        let messages = serde_json::to_value(session.messages())
            .map_err(|e| RepositoryError::Corrupt(format!("chat session {}: {}", session.id(), e)))?;

        Ok(Self {
            id: session.id(),
            user_id: session.user_id(),
            name: session.name().to_string(),
            assigned_class: session.assigned_class().map(str::to_string),
            assigned_document: session.assigned_document(),
            messages,
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        })
    }
}

impl TryFrom<ChatSessionModel> for ChatSession {
    type Error = RepositoryError;

    fn try_from(model: ChatSessionModel) -> Result<Self, Self::Error> {
        let messages = serde_json::from_value(model.messages)
            .map_err(|e| RepositoryError::Corrupt(format!("chat session {}: {}", model.id, e)))?;

        Ok(ChatSession {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            assigned_class: model.assigned_class,
            assigned_document: model.assigned_document,
            messages,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
