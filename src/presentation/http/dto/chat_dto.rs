use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::resolve_citation::CitationTarget;
use crate::application::use_cases::send_message::SendMessageResponse;
use crate::domain::entities::{ChatMessage, ChatSession};

use super::document_dto::download_path;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequestDto {
    pub name: Option<String>,
    pub assigned_class: Option<String>,
    pub assigned_document: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct RenameSessionRequestDto {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequestDto {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub assigned_class: Option<String>,
    pub assigned_document: Option<Uuid>,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ChatSession> for SessionSummaryDto {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id(),
            name: session.name().to_string(),
            assigned_class: session.assigned_class().map(str::to_string),
            assigned_document: session.assigned_document(),
            message_count: session.messages().len(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionDetailDto {
    #[serde(flatten)]
    pub summary: SessionSummaryDto,
    pub messages: Vec<ChatMessage>,
}

impl From<ChatSession> for SessionDetailDto {
    fn from(session: ChatSession) -> Self {
        Self {
            summary: SessionSummaryDto::from(&session),
            messages: session.messages().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponseDto {
    pub session_id: Uuid,
    pub session_name: String,
    pub message: ChatMessage,
}

impl From<SendMessageResponse> for SendMessageResponseDto {
    fn from(response: SendMessageResponse) -> Self {
        Self {
            session_id: response.session_id,
            session_name: response.session_name,
            message: response.reply,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationSourceDto {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub file_name: String,
    pub class_name: String,
    pub page_number: i32,
    pub text: String,
    pub url: String,
}

impl From<CitationTarget> for CitationSourceDto {
    fn from(target: CitationTarget) -> Self {
        let url = target
            .url
            .unwrap_or_else(|| download_path(target.document.id()));
        Self {
            chunk_id: target.chunk.id(),
            document_id: target.document.id(),
            file_name: target.document.file_name().to_string(),
            class_name: target.document.class_name().to_string(),
            page_number: target.chunk.page_number(),
            text: target.chunk.text().to_string(),
            url,
        }
    }
}
