use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::application::ports::{DocumentReadyEvent, Notifier, ServerEvent};
use crate::domain::repositories::{DocumentRepository, RepositoryError};

const BATCH_SIZE: i64 = 100;

/// Polls for documents the ingestion pipeline has finished and tells their
/// owners. Each document is announced once; if marking fails the next tick
/// announces it again.
pub struct DocumentReadyWatcher {
    document_repository: Arc<dyn DocumentRepository>,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
}

impl DocumentReadyWatcher {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        notifier: Arc<dyn Notifier>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            document_repository,
            notifier,
            poll_interval,
        }
    }

    /// One polling pass. Returns how many documents were announced.
    pub async fn tick(&self) -> Result<usize, RepositoryError> {
        let ready = self
            .document_repository
            .find_awaiting_ready_notice(BATCH_SIZE)
            .await?;
        if ready.is_empty() {
            return Ok(0);
        }

        let mut announced: Vec<Uuid> = Vec::with_capacity(ready.len());
        for document in &ready {
            let event = ServerEvent::DocumentReady(DocumentReadyEvent {
                doc_id: document.id(),
                file_name: document.file_name().to_string(),
                class_name: document.class_name().to_string(),
            });
            let delivered = self.notifier.publish(document.user_id(), event).await;
            tracing::debug!(
                document_id = %document.id(),
                user_id = %document.user_id(),
                delivered,
                "document-ready published"
            );
            announced.push(document.id());
        }

        self.document_repository
            .mark_ready_notified(&announced)
            .await?;
        Ok(announced.len())
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(interval = ?self.poll_interval, "Document-ready watcher started");

            let mut ticker = tokio::time::interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match self.tick().await {
                    Ok(0) => {}
                    Ok(n) => tracing::info!("Announced {} processed documents", n),
                    Err(e) => tracing::warn!("Document-ready poll failed: {}", e),
                }
            }
        })
    }
}
