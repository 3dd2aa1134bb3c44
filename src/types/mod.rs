//! Core types for the sync service.

mod chunk;
mod config;
mod page;
mod webhook;

pub use chunk::{Chunk, ChunkMetadata};
pub use config::{ChunkConfig, ServiceConfig};
pub use page::{IngestionResult, IngestionStatus, PageContent};
pub use webhook::{WebhookAck, WebhookPayload, WebhookRelatedItem};
