use std::sync::Arc;

use crate::history::HistoryStore;
use crate::screening::pipeline::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub screener: Arc<Screener>,
    /// JSON file by default; PostgreSQL when DATABASE_URL is set.
    pub history: Arc<dyn HistoryStore>,
}
