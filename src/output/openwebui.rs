//! HTTP sink posting chunks to an Open WebUI knowledge base.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use super::IngestionSink;
use crate::error::SyncError;
use crate::types::Chunk;

/// Sink that sends one batched ingestion request per page to Open WebUI.
pub struct OpenWebUiSink {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Request payload for the knowledge-base ingestion endpoint.
#[derive(Debug, Serialize)]
struct IngestRequest<'a> {
    chunks: Vec<ChunkForIngestion<'a>>,
}

/// Chunk data as the knowledge base expects it.
#[derive(Debug, Serialize)]
struct ChunkForIngestion<'a> {
    chunk_id: String,
    text: &'a str,
    metadata: IngestMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct IngestMetadata<'a> {
    source: String,
    title: &'a str,
    url: &'a str,
}

impl OpenWebUiSink {
    /// Create a new sink for the given Open WebUI instance.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Check if the Open WebUI instance is reachable.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl IngestionSink for OpenWebUiSink {
    fn name(&self) -> &'static str {
        "openwebui"
    }

    async fn send(&self, chunks: &[Chunk], knowledge_base: &str) -> Result<(), SyncError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let request = IngestRequest {
            chunks: chunks
                .iter()
                .map(|c| ChunkForIngestion {
                    chunk_id: c.chunk_id(),
                    text: &c.text,
                    metadata: IngestMetadata {
                        source: format!("BookStack Page ID: {}", c.metadata.page_id),
                        title: &c.metadata.title,
                        url: &c.metadata.url,
                    },
                })
                .collect(),
        };

        let url = format!(
            "{}/api/v1/knowledge-base/{}/ingest",
            self.base_url, knowledge_base
        );
        debug!(%url, chunk_count = chunks.len(), "Sending chunks to Open WebUI");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(SyncError::ingestion)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SyncError::Ingestion(format!(
                "Open WebUI returned {}: {}",
                status, text
            )));
        }

        info!(
            knowledge_base,
            chunk_count = chunks.len(),
            "Chunks accepted by Open WebUI"
        );
        Ok(())
    }
}
