use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::screening::orchestrator::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Screening pipeline with its completion client, extractor and notifier wired in.
    pub screener: Arc<Screener>,
    pub config: Config,
}
