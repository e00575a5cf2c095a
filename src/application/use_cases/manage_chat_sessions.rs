use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::errors::ChatError;
use crate::domain::entities::{ChatSession, chat_session::validate_session_name};
use crate::domain::repositories::{ChatRepository, DocumentRepository, UserRepository};
use crate::domain::value_objects::ClassName;

#[derive(Debug, Clone, Default)]
pub struct CreateSessionRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub assigned_class: Option<String>,
    pub assigned_document: Option<Uuid>,
}

pub struct ManageChatSessionsUseCase {
    chat_repository: Arc<dyn ChatRepository>,
    user_repository: Arc<dyn UserRepository>,
    document_repository: Arc<dyn DocumentRepository>,
}

impl ManageChatSessionsUseCase {
    pub fn new(
        chat_repository: Arc<dyn ChatRepository>,
        user_repository: Arc<dyn UserRepository>,
        document_repository: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            chat_repository,
            user_repository,
            document_repository,
        }
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn create(&self, request: CreateSessionRequest) -> Result<ChatSession, ChatError> {
        let name = request
            .name
            .as_deref()
            .map(validate_session_name)
            .transpose()
            .map_err(ChatError::Validation)?;

        let assigned_class = match request.assigned_class.as_deref() {
            Some(raw) => {
                let class = ClassName::new(raw).map_err(ChatError::Validation)?;
                let user = self
                    .user_repository
                    .find_by_id(request.user_id)
                    .await?
                    .ok_or_else(|| ChatError::NotFound("User not found".into()))?;
                if !user.has_class(class.as_str()) {
                    return Err(ChatError::NotFound(format!("Class '{}' not found", class)));
                }
                Some(class)
            }
            None => None,
        };

        if let Some(document_id) = request.assigned_document {
            let document = self
                .document_repository
                .find_by_id(document_id)
                .await?
                .filter(|d| d.belongs_to(request.user_id))
                .ok_or_else(|| ChatError::NotFound("Document not found".into()))?;

            if let Some(class) = &assigned_class {
                if document.class_name() != class.as_str() {
                    return Err(ChatError::Validation(format!(
                        "Document '{}' is not in class '{}'",
                        document.file_name(),
                        class
                    )));
                }
            }
        }

        let session = ChatSession::new(
            request.user_id,
            name,
            assigned_class,
            request.assigned_document,
        );
        self.chat_repository.insert(&session).await?;

        tracing::info!(session_id = %session.id(), "Chat session created");
        Ok(session)
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.chat_repository.find_for_user(user_id).await?)
    }

    pub async fn get(&self, user_id: Uuid, session_id: Uuid) -> Result<ChatSession, ChatError> {
        self.chat_repository
            .find_by_id(session_id)
            .await?
            .filter(|s| s.belongs_to(user_id))
            .ok_or_else(|| ChatError::NotFound("Chat session not found".into()))
    }

    pub async fn rename(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        name: &str,
    ) -> Result<ChatSession, ChatError> {
        let name = validate_session_name(name).map_err(ChatError::Validation)?;
        let mut session = self.get(user_id, session_id).await?;
        if !self.chat_repository.rename(session.id(), &name).await? {
            return Err(ChatError::NotFound("Chat session not found".into()));
        }
        session.rename(&name).map_err(ChatError::Validation)?;
        Ok(session)
    }

    pub async fn delete(&self, user_id: Uuid, session_id: Uuid) -> Result<(), ChatError> {
        let session = self.get(user_id, session_id).await?;
        if !self.chat_repository.delete(session.id()).await? {
            return Err(ChatError::NotFound("Chat session not found".into()));
        }
        Ok(())
    }
}
