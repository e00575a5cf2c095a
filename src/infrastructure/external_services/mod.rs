pub mod ingestion_client;
pub mod rag_subprocess;

pub use ingestion_client::{HttpIngestionClient, IngestionClientConfig};
pub use rag_subprocess::SubprocessRagEngine;
