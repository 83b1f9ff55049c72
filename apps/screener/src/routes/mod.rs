pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::screening::validation::MAX_RESUME_BYTES;
use crate::state::AppState;

/// Headroom over the resume limit for the text fields and multipart framing.
const UPLOAD_BODY_LIMIT: usize = MAX_RESUME_BYTES + 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/applications",
            post(handlers::handle_submit_application).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/v1/applications/:id",
            get(handlers::handle_get_application),
        )
        .with_state(state)
}
