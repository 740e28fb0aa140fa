use std::sync::Arc;

use crate::analysis::CvAnalyst;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable AI backend. Gemini when `GEMINI_API_KEY` is set, disabled otherwise.
    pub analyst: Arc<dyn CvAnalyst>,
}
