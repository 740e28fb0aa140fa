pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Room for multipart boundaries, headers and the job description on top of
/// the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/cv/analyze", post(handlers::handle_analyze))
        .route("/api/cv/compare", post(handlers::handle_compare))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
