// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// API routes plus the single-page frontend: anything unmatched is served from
/// `static_dir`, and unknown paths fall back to its `index.html`.
pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    let static_dir = static_dir.as_ref();
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
}
