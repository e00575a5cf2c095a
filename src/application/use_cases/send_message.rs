use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::errors::ChatError;
use crate::application::ports::{RagEngine, RagQuery};
use crate::domain::entities::{ChatExchange, ChatMessage};
use crate::domain::repositories::ChatRepository;
use crate::domain::value_objects::bind_citations;

pub const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SendMessageResponse {
    pub session_id: Uuid,
    pub session_name: String,
    pub reply: ChatMessage,
}

pub struct SendMessageUseCase {
    chat_repository: Arc<dyn ChatRepository>,
    rag_engine: Arc<dyn RagEngine>,
    history_limit: usize,
}

impl SendMessageUseCase {
    pub fn new(
        chat_repository: Arc<dyn ChatRepository>,
        rag_engine: Arc<dyn RagEngine>,
        history_limit: usize,
    ) -> Self {
        Self {
            chat_repository,
            rag_engine,
            history_limit,
        }
    }

    /// Asks the answer engine and appends the exchange to the session. If the
    /// engine fails the session is left untouched.
    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    pub async fn execute(&self, request: SendMessageRequest) -> Result<SendMessageResponse, ChatError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ChatError::Validation("Message cannot be empty".into()));
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ChatError::Validation(format!(
                "Message must be at most {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        let session = self
            .chat_repository
            .find_by_id(request.session_id)
            .await?
            .filter(|s| s.belongs_to(request.user_id))
            .ok_or_else(|| ChatError::NotFound("Chat session not found".into()))?;

        let query = RagQuery {
            user_id: request.user_id,
            message: message.to_string(),
            history: session.history(self.history_limit),
            class_name: session.assigned_class().map(str::to_string),
            document_id: session.assigned_document(),
        };

        let answer = self.rag_engine.answer(query).await.inspect_err(|e| {
            tracing::error!("Answer engine failed: {}", e);
        })?;

        let citations = bind_citations(&answer.message, &answer.sources);
        tracing::debug!(
            sources = answer.sources.len(),
            citations = citations.len(),
            "Answer received"
        );

        // Appended to the current row, not to the copy read before the engine ran.
        let stored = self
            .chat_repository
            .append_exchange(
                session.id(),
                ChatExchange {
                    question: message.to_string(),
                    answer: answer.message,
                    citations,
                },
            )
            .await?
            .ok_or_else(|| ChatError::NotFound("Chat session not found".into()))?;
        let reply = stored
            .messages()
            .last()
            .cloned()
            .ok_or_else(|| ChatError::NotFound("Chat session not found".into()))?;

        Ok(SendMessageResponse {
            session_id: stored.id(),
            session_name: stored.name().to_string(),
            reply,
        })
    }
}
