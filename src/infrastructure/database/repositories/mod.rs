pub mod postgres_chat_repository;
pub mod postgres_chunk_repository;
pub mod postgres_document_repository;
pub mod postgres_user_repository;

pub use postgres_chat_repository::PostgresChatRepository;
pub use postgres_chunk_repository::PostgresChunkRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
pub use postgres_user_repository::PostgresUserRepository;
