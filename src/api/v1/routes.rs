/*
 * Responsibility
 * - v1 URL layout
 * - /health, /edge/viewer-request
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{edge::viewer_request, health::health};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/edge/viewer-request", post(viewer_request))
}
