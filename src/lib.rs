//! BookStack RAG Sync Service Library
//!
//! Synchronizes BookStack pages into an Open WebUI knowledge base: webhook
//! events are filtered by monitored book, page content is fetched, split into
//! overlapping character chunks, and forwarded to an ingestion sink.

pub mod api;
pub mod bookstack;
pub mod error;
pub mod filter;
pub mod output;
pub mod processor;
pub mod splitter;
pub mod types;

pub use error::SyncError;
pub use filter::BookFilter;
pub use processor::PageProcessor;
pub use splitter::ChunkSplitter;
pub use types::{Chunk, ChunkConfig, ChunkMetadata, IngestionResult, IngestionStatus, PageContent};

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default chunk overlap in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;
