use serde::Deserialize;
use thiserror::Error;

use crate::services::edge_request::EdgeRequest;

/// Why a request was refused.
///
/// Internal only: every variant renders as the same `401 Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("missing authorization header")]
    MissingAuthHeader,
    #[error("authorization header is not a bearer credential")]
    MalformedBearer,
    #[error("signing secret unavailable")]
    SecretUnavailable,
    #[error("malformed token")]
    MalformedToken,
    #[error("unsupported signing algorithm")]
    UnknownAlgorithm,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("token not yet valid")]
    TokenNotYetValid,
    #[error("token expired")]
    TokenExpired,
}

/// Verified token payload.
///
/// Only `organization`, `nbf` and `exp` are interpreted; anything else is kept
/// in `extra` untouched. `nbf`/`exp` are Unix seconds and may be fractional.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub organization: String,

    #[serde(default)]
    pub nbf: Option<f64>,
    #[serde(default)]
    pub exp: Option<f64>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of authorizing one edge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Pre-flight; never authenticated.
    Passthrough,
    /// Verified and scoped to the token's organization.
    Rewritten(EdgeRequest),
    Denied(AuthFailure),
}
