use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{Citation, ClassName};

pub const DEFAULT_SESSION_NAME: &str = "New Chat";
pub const MAX_SESSION_NAME_CHARS: usize = 100;
const AUTO_NAME_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
    pub created_at: DateTime<Utc>,
}

/// A question and the engine's answer, appended to a session together.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub question: String,
    pub answer: String,
    pub citations: Vec<Citation>,
}

/// Prior turn handed to the answer engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub(crate) id: Uuid,
    pub(crate) user_id: Uuid,
    pub(crate) name: String,
    pub(crate) assigned_class: Option<String>,
    pub(crate) assigned_document: Option<Uuid>,
    pub(crate) messages: Vec<ChatMessage>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

pub fn validate_session_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Session name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_SESSION_NAME_CHARS {
        return Err(format!(
            "Session name must be at most {} characters",
            MAX_SESSION_NAME_CHARS
        ));
    }
    Ok(name.to_string())
}

impl ChatSession {
    pub fn new(
        user_id: Uuid,
        name: Option<String>,
        assigned_class: Option<ClassName>,
        assigned_document: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
            assigned_class: assigned_class.map(ClassName::into_inner),
            assigned_document,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assigned_class(&self) -> Option<&str> {
        self.assigned_class.as_deref()
    }

    pub fn assigned_document(&self) -> Option<Uuid> {
        self.assigned_document
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn belongs_to(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn rename(&mut self, name: &str) -> Result<(), String> {
        self.name = validate_session_name(name)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// The last `limit` messages, oldest first.
    pub fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        let skip = self.messages.len().saturating_sub(limit);
        self.messages
            .iter()
            .skip(skip)
            .map(|m| HistoryEntry {
                role: m.role,
                content: m.content.clone(),
            })
            .collect()
    }

    /// Appends a question and its answer. A session still carrying the default
    /// name is named after its first question.
    pub fn record_exchange(
        &mut self,
        question: String,
        answer: String,
        citations: Vec<Citation>,
    ) -> &ChatMessage {
        let now = Utc::now();

        if self.messages.is_empty() && self.name == DEFAULT_SESSION_NAME {
            self.name = auto_name(&question);
        }

        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: question,
            citations: Vec::new(),
            created_at: now,
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: answer,
            citations,
            created_at: now,
        });
        self.updated_at = now;

        &self.messages[self.messages.len() - 1]
    }
}

fn auto_name(question: &str) -> String {
    let flat = question.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= AUTO_NAME_CHARS {
        return if flat.is_empty() {
            DEFAULT_SESSION_NAME.to_string()
        } else {
            flat
        };
    }
    let truncated: String = flat.chars().take(AUTO_NAME_CHARS).collect();
    format!("{}...", truncated.trim_end())
}
