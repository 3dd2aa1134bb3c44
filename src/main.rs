//! BookStack RAG Sync Service - Main Entry Point
//!
//! Listens for BookStack webhooks and syncs monitored pages into an
//! Open WebUI knowledge base.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstack_rag_sync::api::{self, AppState};
use bookstack_rag_sync::bookstack::BookStackClient;
use bookstack_rag_sync::filter::BookFilter;
use bookstack_rag_sync::output;
use bookstack_rag_sync::processor::PageProcessor;
use bookstack_rag_sync::types::ServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "bookstack_rag_sync=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a bad chunk-size/overlap combination fails here,
    // not inside a background task.
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env()?;

    info!(
        "Starting BookStack RAG Sync Service v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(
        chunk_size = config.chunk.chunk_size(),
        chunk_overlap = config.chunk.chunk_overlap(),
        "Chunking configuration loaded"
    );

    let bookstack = Arc::new(BookStackClient::from_config(&config));

    // Resolve the monitored set once; it is read-only for the process lifetime.
    let mut monitored = config.monitored_book_ids.clone();
    if let Some(shelf_id) = config.bookstack_shelf_id {
        match bookstack.fetch_shelf_books(shelf_id).await {
            Ok(ids) => {
                info!(shelf_id, books = ids.len(), "Resolved monitored shelf");
                monitored.extend(ids);
            }
            Err(e) => {
                error!(shelf_id, error = %e, "Could not resolve monitored shelf");
            }
        }
    }
    let filter = BookFilter::new(monitored);
    if filter.is_empty() {
        anyhow::bail!("no monitored books resolved; check BOOKSTACK_BOOK_IDS / BOOKSTACK_SHELF_ID");
    }
    info!(monitored_books = ?filter.monitored_books(), "Monitoring books");

    let sink = output::sink_from_config(&config);
    let knowledge_base = config
        .knowledge_base_name
        .clone()
        .unwrap_or_else(|| "default".to_string());
    let processor = Arc::new(PageProcessor::new(config.chunk, sink, &knowledge_base));

    let state = Arc::new(AppState {
        filter,
        bookstack,
        processor,
    });

    // Build HTTP routes
    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
