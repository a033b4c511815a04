use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::v1::dto::edge_event::{EdgeEvent, EdgeResponse};
use crate::error::AppError;
use crate::state::AppState;

/// POST /edge/viewer-request
///
/// Runs the authorizer over one edge event. The HTTP status is 200 for every
/// decision; the decision itself is the body (forwarded request or status object).
pub async fn viewer_request(
    State(state): State<AppState>,
    payload: Result<Json<EdgeEvent>, JsonRejection>,
) -> Result<Json<EdgeResponse>, AppError> {
    let Json(event) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "unreadable edge event");
        AppError::bad_request("INVALID_EDGE_EVENT", rejection.body_text())
    })?;

    let decision = state.authorizer.authorize(event.request).await;

    Ok(Json(decision.into()))
}
