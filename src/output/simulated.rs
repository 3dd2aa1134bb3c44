//! Logging simulator sink for running without an Open WebUI instance.

use async_trait::async_trait;
use tracing::{debug, info};

use super::IngestionSink;
use crate::error::SyncError;
use crate::types::Chunk;

/// Sink that logs what would be ingested and always succeeds.
pub struct SimulatedSink;

#[async_trait]
impl IngestionSink for SimulatedSink {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn send(&self, chunks: &[Chunk], knowledge_base: &str) -> Result<(), SyncError> {
        for chunk in chunks {
            debug!(
                chunk_id = %chunk.chunk_id(),
                chars = chunk.char_len(),
                "Simulated chunk ingestion"
            );
        }
        info!(
            knowledge_base,
            chunk_count = chunks.len(),
            "Simulated ingestion complete"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;

    #[tokio::test]
    async fn test_always_succeeds() {
        let sink = SimulatedSink;
        let chunks = vec![Chunk {
            index: 0,
            text: "body".to_string(),
            start_offset: 0,
            end_offset: 4,
            metadata: ChunkMetadata::default(),
        }];
        assert!(sink.send(&chunks, "wiki").await.is_ok());
        assert!(sink.send(&[], "wiki").await.is_ok());
    }
}
