pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assistant;
use crate::extract::{self, MAX_UPLOAD_BYTES};
use crate::pipeline;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cv/extract", post(extract::handle_extract))
        .route("/api/v1/pipeline/run", post(pipeline::handlers::handle_run))
        .route(
            "/api/v1/pipeline/export",
            post(pipeline::handlers::handle_export),
        )
        .route(
            "/api/v1/assistant/chat",
            post(assistant::handlers::handle_chat),
        )
        // Room for the 10 MB PDF cap plus multipart framing overhead
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}
