use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/health
/// Returns service status and whether the AI backend is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "CV Checker API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "geminiConfigured": state.config.gemini_configured(),
        "analysisBackend": state.analyst.backend(),
    }))
}
