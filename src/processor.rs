//! Page processor: validate, split, attach metadata, ingest.

use std::sync::Arc;

use tracing::{error, info};

use crate::output::IngestionSink;
use crate::splitter::ChunkSplitter;
use crate::types::{ChunkConfig, ChunkMetadata, IngestionResult, PageContent};

/// Orchestrates one page's journey from raw text to the ingestion sink.
///
/// Collaborator failures are converted into error-status results here; they
/// never propagate further, because the webhook response has already been
/// sent by the time a processor runs.
pub struct PageProcessor {
    config: ChunkConfig,
    sink: Arc<dyn IngestionSink>,
    knowledge_base: String,
}

impl PageProcessor {
    /// Create a processor bound to a sink and knowledge base.
    pub fn new(config: ChunkConfig, sink: Arc<dyn IngestionSink>, knowledge_base: &str) -> Self {
        Self {
            config,
            sink,
            knowledge_base: knowledge_base.to_string(),
        }
    }

    /// Split a fetched page into chunks and hand them to the sink in one call.
    ///
    /// An empty or whitespace-only page is not an error: it yields a success
    /// result with zero chunks and the sink is never invoked.
    pub async fn process(&self, page: &PageContent) -> IngestionResult {
        if page.raw_text.trim().is_empty() {
            info!(page_id = page.page_id, "Page has no content, nothing to ingest");
            return IngestionResult::success(page.page_id, 0);
        }

        let metadata = ChunkMetadata {
            page_id: page.page_id,
            book_id: page.book_id,
            title: page.title.clone(),
            url: page.url.clone(),
        };

        let mut chunks = ChunkSplitter::split(&page.raw_text, &self.config);
        for chunk in &mut chunks {
            chunk.metadata = metadata.clone();
        }

        info!(
            page_id = page.page_id,
            chunk_count = chunks.len(),
            sink = self.sink.name(),
            "Page split, sending chunks"
        );

        match self.sink.send(&chunks, &self.knowledge_base).await {
            Ok(()) => IngestionResult::success(page.page_id, chunks.len()),
            Err(e) => {
                error!(page_id = page.page_id, error = %e, "Ingestion failed");
                IngestionResult::error(page.page_id, chunks.len(), e.to_string())
            }
        }
    }
}
