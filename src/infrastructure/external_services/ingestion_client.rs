use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use std::time::Duration;

use crate::application::ports::{IngestionError, IngestionJob, IngestionService};
use crate::config::IngestionConfig;

#[derive(Debug, Clone)]
pub struct IngestionClientConfig {
    pub base_url: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub backoff_factor: f64,
    pub base_delay: Duration,
}

impl From<&IngestionConfig> for IngestionClientConfig {
    fn from(config: &IngestionConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            timeout_secs: config.timeout_secs,
            backoff_factor: config.backoff_factor,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Outcome of a single attempt; only transient failures are retried.
enum Attempt {
    Transient(String),
    Fatal(IngestionError),
}

/// Calls the ingestion service's `process_upload` endpoint, retrying transport
/// errors and 5xx answers with exponential backoff.
#[derive(Debug, Clone)]
pub struct HttpIngestionClient {
    client: Client,
    config: IngestionClientConfig,
}

impl HttpIngestionClient {
    pub fn new(config: IngestionClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/process_upload", self.config.base_url)
    }

    async fn execute_request(&self, job: &IngestionJob) -> Result<(), Attempt> {
        let response = self
            .client
            .post(self.endpoint())
            .json(job)
            .send()
            .await
            .map_err(|e| Attempt::Transient(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            Err(Attempt::Transient(format!("{}: {}", status, body)))
        } else {
            Err(Attempt::Fatal(IngestionError::Rejected {
                status: status.as_u16(),
                body,
            }))
        }
    }
}

#[async_trait]
impl IngestionService for HttpIngestionClient {
    async fn process_upload(&self, job: &IngestionJob) -> Result<(), IngestionError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.execute_request(job).await {
                Ok(()) => return Ok(()),
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Transient(last_error)) => {
                    if attempts > self.config.max_retries {
                        return Err(IngestionError::RetriesExhausted {
                            attempts,
                            last_error,
                        });
                    }

                    let backoff = self
                        .config
                        .base_delay
                        .mul_f64(self.config.backoff_factor.powi(attempts as i32 - 1));
                    tracing::warn!(
                        doc_id = %job.doc_id,
                        attempt = attempts,
                        "Ingestion call failed, retrying in {:?}: {}",
                        backoff,
                        last_error
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}
