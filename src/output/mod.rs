//! Ingestion sinks: where chunks go after splitting.

mod openwebui;
mod simulated;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::SyncError;
use crate::types::{Chunk, ServiceConfig};

pub use openwebui::OpenWebUiSink;
pub use simulated::SimulatedSink;

/// A destination that accepts a page's chunks for indexing.
///
/// Implementations must accept the whole chunk sequence of a page in one
/// call; the processor never sends per-chunk.
#[async_trait]
pub trait IngestionSink: Send + Sync {
    /// Name of this sink, for logs.
    fn name(&self) -> &'static str;

    /// Send all chunks of one page to the knowledge base.
    async fn send(&self, chunks: &[Chunk], knowledge_base: &str) -> Result<(), SyncError>;
}

/// Select a sink from configuration.
///
/// The HTTP sink requires all three Open WebUI settings; with any of them
/// missing the service falls back to the logging simulator, mirroring the
/// original "credentials incomplete" behavior.
pub fn sink_from_config(config: &ServiceConfig) -> Arc<dyn IngestionSink> {
    match (&config.openwebui_base_url, &config.openwebui_api_key, &config.knowledge_base_name) {
        (Some(base_url), Some(api_key), Some(_)) => {
            info!(%base_url, "Using Open WebUI ingestion sink");
            Arc::new(OpenWebUiSink::new(base_url, api_key))
        }
        _ => {
            info!("Open WebUI credentials incomplete, using simulated ingestion sink");
            Arc::new(SimulatedSink)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkConfig;

    fn base_config() -> ServiceConfig {
        ServiceConfig {
            bookstack_base_url: "http://wiki.local/".to_string(),
            bookstack_token_id: "id".to_string(),
            bookstack_token_secret: "secret".to_string(),
            bookstack_shelf_id: None,
            monitored_book_ids: vec![1],
            openwebui_base_url: None,
            openwebui_api_key: None,
            knowledge_base_name: None,
            chunk: ChunkConfig::default(),
            port: 8000,
        }
    }

    #[test]
    fn test_simulated_sink_when_credentials_missing() {
        let sink = sink_from_config(&base_config());
        assert_eq!(sink.name(), "simulated");
    }

    #[test]
    fn test_openwebui_sink_when_fully_configured() {
        let mut config = base_config();
        config.openwebui_base_url = Some("http://openwebui.local".to_string());
        config.openwebui_api_key = Some("key".to_string());
        config.knowledge_base_name = Some("wiki".to_string());
        let sink = sink_from_config(&config);
        assert_eq!(sink.name(), "openwebui");
    }

    #[test]
    fn test_partial_credentials_fall_back_to_simulated() {
        let mut config = base_config();
        config.openwebui_base_url = Some("http://openwebui.local".to_string());
        let sink = sink_from_config(&config);
        assert_eq!(sink.name(), "simulated");
    }
}
