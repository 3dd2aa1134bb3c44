//! Page content and processing result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fetched BookStack page, ready for chunking.
///
/// Produced by the BookStack client and consumed once by the page processor;
/// never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// BookStack page id
    pub page_id: i64,

    /// Id of the book containing the page
    pub book_id: i64,

    /// Page title
    pub title: String,

    /// Page URL in BookStack
    pub url: String,

    /// Page body as markdown or plain text
    pub raw_text: String,

    /// Chapter containing the page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<i64>,
}

/// Outcome of one processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStatus {
    /// Chunks produced and accepted (or page was empty and yielded none)
    Success,
    /// Page skipped before any processing
    Ignored,
    /// Fetch or ingestion failed
    Error,
}

/// Summary of one page-processing run.
///
/// Created at the end of a run, logged, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionResult {
    /// Page the run operated on
    pub page_id: i64,

    /// Number of chunks produced
    pub chunk_count: usize,

    /// Terminal status of the run
    pub status: IngestionStatus,

    /// Failure or skip reason, when not successful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// When the run finished
    pub processed_at: DateTime<Utc>,
}

impl IngestionResult {
    /// Successful run that produced `chunk_count` chunks.
    pub fn success(page_id: i64, chunk_count: usize) -> Self {
        Self {
            page_id,
            chunk_count,
            status: IngestionStatus::Success,
            reason: None,
            processed_at: Utc::now(),
        }
    }

    /// Failed run with a reason.
    pub fn error(page_id: i64, chunk_count: usize, reason: impl Into<String>) -> Self {
        Self {
            page_id,
            chunk_count,
            status: IngestionStatus::Error,
            reason: Some(reason.into()),
            processed_at: Utc::now(),
        }
    }
}
