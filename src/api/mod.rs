//! HTTP surface of the sync service.

pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

pub use handlers::AppState;

/// Build the route table over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::read_root))
        .route("/health", get(handlers::health_check))
        .route("/webhook/bookstack", post(handlers::bookstack_webhook))
        .with_state(state)
}
