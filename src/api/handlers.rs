//! HTTP request handlers for the sync service.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::bookstack::BookStackClient;
use crate::filter::BookFilter;
use crate::processor::PageProcessor;
use crate::types::{IngestionStatus, WebhookAck, WebhookPayload};

/// Application state shared across handlers.
pub struct AppState {
    pub filter: BookFilter,
    pub bookstack: Arc<BookStackClient>,
    pub processor: Arc<PageProcessor>,
}

/// Root response describing the running service.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    message: String,
    monitored_books: Vec<i64>,
}

/// Service landing endpoint.
pub async fn read_root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "BookStack RAG Sync Service está rodando.".to_string(),
        monitored_books: state.filter.monitored_books(),
    })
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    monitored_books_count: usize,
    monitored_books: Vec<i64>,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        monitored_books_count: state.filter.len(),
        monitored_books: state.filter.monitored_books(),
    })
}

/// BookStack webhook endpoint.
///
/// Filters by event type and monitored book, then schedules fetch → split →
/// ingest as a detached task. The acknowledgment is returned immediately and
/// never reflects the outcome of the background work.
pub async fn bookstack_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WebhookPayload>,
) -> Json<WebhookAck> {
    if !matches!(payload.event.as_str(), "page_update" | "page_create") {
        info!(event = %payload.event, "Ignoring unsupported event");
        return Json(WebhookAck::ignored(format!(
            "Event type {} not supported",
            payload.event
        )));
    }

    let page_id = payload.related_item.id;
    let book_id = payload.related_item.book_id;

    if !state.filter.is_monitored(book_id) {
        info!(page_id, book_id, "Ignoring update, book not monitored");
        return Json(WebhookAck::ignored("Book not in monitored list"));
    }

    let page_name = payload.related_item.name.clone();
    info!(page_id, book_id, page_name = %page_name, "Scheduling background processing");

    let task_state = state.clone();
    tokio::spawn(async move {
        process_page_update(task_state, page_id, &page_name).await;
    });

    Json(WebhookAck::accepted(page_id))
}

/// Background task: fetch the page and run it through the processor.
///
/// Failures terminate this task only; they are logged and never reach the
/// webhook caller.
async fn process_page_update(state: Arc<AppState>, page_id: i64, page_name: &str) {
    info!(page_id, page_name, "Starting background processing");

    let page = match state.bookstack.fetch_page(page_id).await {
        Ok(page) => page,
        Err(e) => {
            warn!(page_id, error = %e, "Could not fetch page content");
            return;
        }
    };

    let result = state.processor.process(&page).await;
    match result.status {
        IngestionStatus::Error => {
            error!(
                page_id,
                chunk_count = result.chunk_count,
                reason = result.reason.as_deref().unwrap_or("unknown"),
                "Background processing failed"
            );
        }
        _ => {
            info!(
                page_id,
                chunk_count = result.chunk_count,
                "Background processing complete"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use crate::error::SyncError;
    use crate::output::IngestionSink;
    use crate::types::{Chunk, ChunkConfig};

    struct CountingSink {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IngestionSink for CountingSink {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn send(&self, _chunks: &[Chunk], _kb: &str) -> Result<(), SyncError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_state(sink: Arc<CountingSink>) -> Arc<AppState> {
        // Unroutable BookStack endpoint: background fetches fail fast, which
        // is fine because the ack must not depend on them.
        let bookstack = Arc::new(BookStackClient::new("http://127.0.0.1:9", "id", "secret"));
        Arc::new(AppState {
            filter: BookFilter::new([1, 2, 3]),
            bookstack,
            processor: Arc::new(PageProcessor::new(
                ChunkConfig::new(1000, 200).unwrap(),
                sink,
                "wiki",
            )),
        })
    }

    fn webhook_payload(event: &str, page_id: i64, book_id: i64) -> serde_json::Value {
        serde_json::json!({
            "event": event,
            "text": "Page updated",
            "url": "http://wiki.local/",
            "related_item": {
                "id": page_id,
                "name": "Runbook",
                "slug": "runbook",
                "book_id": book_id,
                "url": "http://wiki.local/books/ops/page/runbook"
            }
        })
    }

    async fn post_webhook(state: Arc<AppState>, payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let app = crate::api::router(state);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook/bookstack")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(state: Arc<AppState>, uri: &str) -> serde_json::Value {
        let app = crate::api::router(state);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_monitored_book_is_accepted() {
        let sink = Arc::new(CountingSink { calls: AtomicUsize::new(0) });
        let state = test_state(sink);

        let (status, body) = post_webhook(state, webhook_payload("page_update", 101, 2)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "status": "success",
                "message": "Processamento da página 101 iniciado em background."
            })
        );
    }

    #[tokio::test]
    async fn test_unmonitored_book_is_ignored_without_processing() {
        let sink = Arc::new(CountingSink { calls: AtomicUsize::new(0) });
        let state = test_state(sink.clone());

        let (status, body) = post_webhook(state, webhook_payload("page_update", 101, 999)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "status": "ignored",
                "reason": "Book not in monitored list"
            })
        );

        // No background task was scheduled, so the sink stays untouched.
        tokio::task::yield_now().await;
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_event_is_ignored() {
        let sink = Arc::new(CountingSink { calls: AtomicUsize::new(0) });
        let state = test_state(sink.clone());

        let (status, body) = post_webhook(state, webhook_payload("page_delete", 101, 2)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "status": "ignored",
                "reason": "Event type page_delete not supported"
            })
        );
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_root_reports_monitored_books() {
        let sink = Arc::new(CountingSink { calls: AtomicUsize::new(0) });
        let body = get_json(test_state(sink), "/").await;
        assert_eq!(
            body,
            serde_json::json!({
                "message": "BookStack RAG Sync Service está rodando.",
                "monitored_books": [1, 2, 3]
            })
        );
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let sink = Arc::new(CountingSink { calls: AtomicUsize::new(0) });
        let body = get_json(test_state(sink), "/health").await;
        assert_eq!(
            body,
            serde_json::json!({
                "status": "healthy",
                "monitored_books_count": 3,
                "monitored_books": [1, 2, 3]
            })
        );
    }
}
