pub mod chat_session;
pub mod chunk;
pub mod document;
pub mod user;

pub use chat_session::{ChatExchange, ChatMessage, ChatRole, ChatSession, HistoryEntry};
pub use chunk::Chunk;
pub use document::Document;
pub use user::User;
