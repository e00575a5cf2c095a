pub mod file_storage;
pub mod ingestion_service;
pub mod notifier;
pub mod rag_engine;

pub use file_storage::{FileStorage, FileStorageError, StoredObject};
pub use ingestion_service::{IngestionError, IngestionJob, IngestionService};
pub use notifier::{DocumentReadyEvent, Notifier, ServerEvent};
pub use rag_engine::{RagAnswer, RagEngine, RagError, RagQuery};
