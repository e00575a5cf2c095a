pub mod chat_repository;
pub mod chunk_repository;
pub mod document_repository;
pub mod user_repository;

pub use chat_repository::ChatRepository;
pub use chunk_repository::ChunkRepository;
pub use document_repository::{ClassPurge, DocumentRepository};
pub use user_repository::UserRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}
