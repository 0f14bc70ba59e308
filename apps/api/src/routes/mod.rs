pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::analysis::handlers::handle_analyze;
use crate::chat::handlers::handle_chat;
use crate::state::AppState;

/// Largest accepted upload. 510(k) submissions routinely run to hundreds of
/// pages.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/chat", post(handle_chat))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
