use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use uuid::Uuid;

use crate::application::ports::{RagAnswer, RagEngine, RagError, RagQuery};
use crate::config::RagConfig;
use crate::domain::value_objects::SourceChunk;

const STDERR_TAIL_CHARS: usize = 2000;

#[derive(Debug, Deserialize)]
struct EngineOutput {
    #[serde(alias = "answer", alias = "response")]
    message: String,
    #[serde(default)]
    sources: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct EngineSource {
    #[serde(alias = "chunkId")]
    chunk_id: Uuid,
    #[serde(alias = "docId", alias = "document_id", alias = "documentId")]
    doc_id: Uuid,
    #[serde(default, alias = "fileName")]
    file_name: String,
    #[serde(default, alias = "pageNumber", alias = "page")]
    page_number: i32,
}

impl From<EngineSource> for SourceChunk {
    fn from(source: EngineSource) -> Self {
        SourceChunk {
            chunk_id: source.chunk_id,
            document_id: source.doc_id,
            file_name: source.file_name,
            page_number: source.page_number,
        }
    }
}

/// Reads the engine result from its stdout: the last line holding a JSON
/// object. Earlier lines are treated as log noise.
pub fn parse_engine_output(stdout: &str) -> Result<RagAnswer, RagError> {
    let object = stdout
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .find_map(|line| match serde_json::from_str::<serde_json::Value>(line) {
            Ok(value) if value.is_object() => Some(value),
            _ => None,
        })
        .ok_or_else(|| RagError::InvalidOutput("no JSON result on stdout".to_string()))?;

    let output: EngineOutput =
        serde_json::from_value(object).map_err(|e| RagError::InvalidOutput(e.to_string()))?;

    let sources = output
        .sources
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<EngineSource>(raw) {
            Ok(source) => Some(SourceChunk::from(source)),
            Err(e) => {
                tracing::warn!("Skipping malformed source entry: {}", e);
                None
            }
        })
        .collect();

    Ok(RagAnswer {
        message: output.message,
        sources,
    })
}

fn tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.trim().to_string();
    }
    text.chars().skip(count - max_chars).collect::<String>().trim().to_string()
}

/// Answers chat messages by running the Python retrieval script once per
/// question.
#[derive(Debug, Clone)]
pub struct SubprocessRagEngine {
    python_path: String,
    script_path: String,
    timeout: Duration,
}

impl SubprocessRagEngine {
    pub fn new(python_path: impl Into<String>, script_path: impl Into<String>, timeout: Duration) -> Self {
        Self {
            python_path: python_path.into(),
            script_path: script_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &RagConfig) -> Self {
        Self::new(
            config.python_path.clone(),
            config.script_path.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn command(&self, query: &RagQuery, history_json: String) -> Command {
        let mut command = Command::new(&self.python_path);
        command
            .arg(&self.script_path)
            .arg(query.user_id.to_string())
            .arg(&query.message)
            .arg(history_json)
            .arg(query.class_name.clone().unwrap_or_default())
            .arg(query.document_id.map(|id| id.to_string()).unwrap_or_default())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl RagEngine for SubprocessRagEngine {
    async fn answer(&self, query: RagQuery) -> Result<RagAnswer, RagError> {
        let history_json =
            serde_json::to_string(&query.history).map_err(|e| RagError::Spawn(e.to_string()))?;

        let child = self
            .command(&query, history_json)
            .spawn()
            .map_err(|e| RagError::Spawn(format!("{}: {}", self.python_path, e)))?;

        let started = std::time::Instant::now();
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RagError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| RagError::Spawn(e.to_string()))?;

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            status = ?output.status.code(),
            "Answer engine finished"
        );

        if !output.status.success() {
            return Err(RagError::ProcessFailed {
                code: output.status.code(),
                stderr: tail(&String::from_utf8_lossy(&output.stderr), STDERR_TAIL_CHARS),
            });
        }

        parse_engine_output(&String::from_utf8_lossy(&output.stdout))
    }
}
