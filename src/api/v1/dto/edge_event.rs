//! Wire types for the viewer-request function endpoint.

use serde::{Deserialize, Serialize};

use crate::services::auth::Decision;
use crate::services::edge_request::EdgeRequest;

/// Event delivered by the edge runtime. Only `request` is read; `version`,
/// `context`, `viewer` and friends are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeEvent {
    pub request: EdgeRequest,
}

/// Bodiless status result; the edge runtime answers the viewer with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStatus {
    pub status_code: u16,
    pub status_description: &'static str,
}

impl EdgeStatus {
    pub const OK: Self = Self {
        status_code: 200,
        status_description: "Ok",
    };

    pub const UNAUTHORIZED: Self = Self {
        status_code: 401,
        status_description: "Unauthorized",
    };
}

/// Function result: either the request to forward, or a status to answer with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EdgeResponse {
    Forward(EdgeRequest),
    Respond(EdgeStatus),
}

impl From<Decision> for EdgeResponse {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Passthrough => EdgeResponse::Respond(EdgeStatus::OK),
            Decision::Rewritten(request) => EdgeResponse::Forward(request),
            // Every failure kind looks the same from outside.
            Decision::Denied(_) => EdgeResponse::Respond(EdgeStatus::UNAUTHORIZED),
        }
    }
}
