//! Configuration types for the sync service.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SyncError;
use crate::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

/// Validated chunking configuration.
///
/// The overlap must be strictly less than the chunk size, otherwise the
/// sliding window cannot make progress; the invariant is enforced here, at
/// construction, so a bad combination fails at startup rather than inside a
/// background task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Maximum characters per chunk
    chunk_size: usize,

    /// Characters repeated between consecutive chunks
    chunk_overlap: usize,
}

impl ChunkConfig {
    /// Create a config, validating the overlap invariant.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, SyncError> {
        if chunk_size == 0 {
            return Err(SyncError::Configuration(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(SyncError::Configuration(format!(
                "chunk_overlap ({}) must be strictly less than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Characters advanced between consecutive chunk starts.
    pub fn stride(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// BookStack instance URL, normalized to end with `/`
    pub bookstack_base_url: String,

    /// BookStack API token id
    pub bookstack_token_id: String,

    /// BookStack API token secret
    pub bookstack_token_secret: String,

    /// Shelf whose books are added to the monitored set at startup
    pub bookstack_shelf_id: Option<i64>,

    /// Explicitly monitored book ids
    pub monitored_book_ids: Vec<i64>,

    /// Open WebUI instance URL
    pub openwebui_base_url: Option<String>,

    /// Open WebUI API key
    pub openwebui_api_key: Option<String>,

    /// Target knowledge base name in Open WebUI
    pub knowledge_base_name: Option<String>,

    /// Chunking parameters
    pub chunk: ChunkConfig,

    /// HTTP listen port
    pub port: u16,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing BookStack credentials, a malformed book-id list, or an invalid
    /// chunk-size/overlap combination abort startup. Unparsable chunk numbers
    /// fall back to the defaults with a warning.
    pub fn from_env() -> Result<Self, SyncError> {
        let bookstack_base_url = require_env("BOOKSTACK_BASE_URL")?;
        let bookstack_token_id = require_env("BOOKSTACK_TOKEN_ID")?;
        let bookstack_token_secret = require_env("BOOKSTACK_TOKEN_SECRET")?;

        let bookstack_shelf_id = match std::env::var("BOOKSTACK_SHELF_ID") {
            Ok(raw) => Some(raw.trim().parse::<i64>().map_err(|_| {
                SyncError::Configuration(format!("BOOKSTACK_SHELF_ID is not an integer: {raw}"))
            })?),
            Err(_) => None,
        };

        let monitored_book_ids = match std::env::var("BOOKSTACK_BOOK_IDS") {
            Ok(raw) => parse_book_ids(&raw)?,
            Err(_) => Vec::new(),
        };

        if monitored_book_ids.is_empty() && bookstack_shelf_id.is_none() {
            return Err(SyncError::Configuration(
                "neither BOOKSTACK_BOOK_IDS nor BOOKSTACK_SHELF_ID is configured".to_string(),
            ));
        }

        let chunk_size = parse_env_or("CHUNK_SIZE", DEFAULT_CHUNK_SIZE);
        let chunk_overlap = parse_env_or("CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP);
        let chunk = ChunkConfig::new(chunk_size, chunk_overlap)?;

        Ok(Self {
            bookstack_base_url: normalize_base_url(bookstack_base_url),
            bookstack_token_id,
            bookstack_token_secret,
            bookstack_shelf_id,
            monitored_book_ids,
            openwebui_base_url: std::env::var("OPENWEBUI_BASE_URL").ok(),
            openwebui_api_key: std::env::var("OPENWEBUI_API_KEY").ok(),
            knowledge_base_name: std::env::var("OPENWEBUI_KNOWLEDGE_BASE_NAME").ok(),
            chunk,
            port: parse_env_or("PORT", 8000),
        })
    }
}

fn require_env(name: &str) -> Result<String, SyncError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SyncError::Configuration(format!("{name} is not configured")))
}

fn parse_env_or<T: std::str::FromStr + std::fmt::Display + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(%name, %raw, %default, "Invalid value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a comma-separated list of book ids, e.g. `"1, 2,3"`.
fn parse_book_ids(raw: &str) -> Result<Vec<i64>, SyncError> {
    raw.split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| {
                SyncError::Configuration(format!(
                    "BOOKSTACK_BOOK_IDS must contain comma-separated integers, got: {part}"
                ))
            })
        })
        .collect()
}

fn normalize_base_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ChunkConfig::new(1000, 200).unwrap();
        assert_eq!(config.chunk_size(), 1000);
        assert_eq!(config.chunk_overlap(), 200);
        assert_eq!(config.stride(), 800);
    }

    #[test]
    fn test_overlap_equal_to_size_rejected() {
        let err = ChunkConfig::new(1000, 1000).unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    #[test]
    fn test_overlap_greater_than_size_rejected() {
        let err = ChunkConfig::new(1000, 1200).unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = ChunkConfig::new(0, 0).unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    #[test]
    fn test_default_config_matches_service_defaults() {
        let config = ChunkConfig::default();
        assert_eq!(config.chunk_size(), 1000);
        assert_eq!(config.chunk_overlap(), 200);
    }

    #[test]
    fn test_parse_book_ids() {
        assert_eq!(parse_book_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_book_ids("7").unwrap(), vec![7]);
        assert!(parse_book_ids("1,two,3").is_err());
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://wiki".into()), "http://wiki/");
        assert_eq!(normalize_base_url("http://wiki/".into()), "http://wiki/");
    }
}
