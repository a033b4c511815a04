//! Per-request authorization decision for the edge.
//!
//! method check -> bearer extraction -> secret fetch -> verification -> rewrite.
//! The secret fetch is the only await point.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::auth::{
    bearer::bearer_token,
    rewrite::RewriteRules,
    types::{AuthFailure, Claims, Decision},
    verifier,
};
use crate::services::edge_request::EdgeRequest;
use crate::services::secrets::SecretProvider;

/// Pre-flight requests skip authorization entirely.
pub const PREFLIGHT_METHOD: &str = "OPTIONS";

const AUTHORIZATION_HEADER: &str = "authorization";

#[derive(Clone)]
pub struct EdgeAuthorizer {
    secrets: Arc<dyn SecretProvider>,
    secret_name: String,
    rules: RewriteRules,
}

impl std::fmt::Debug for EdgeAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeAuthorizer")
            .field("secret_name", &self.secret_name)
            .field("rules", &self.rules)
            .finish()
    }
}

impl EdgeAuthorizer {
    pub fn new(
        secrets: Arc<dyn SecretProvider>,
        secret_name: impl Into<String>,
        rules: RewriteRules,
    ) -> Self {
        Self {
            secrets,
            secret_name: secret_name.into(),
            rules,
        }
    }

    #[tracing::instrument(skip_all, fields(method = %request.method, uri = %request.uri))]
    pub async fn authorize(&self, mut request: EdgeRequest) -> Decision {
        if request.method == PREFLIGHT_METHOD {
            debug!("pre-flight request, passing through");
            return Decision::Passthrough;
        }

        match self.verified_claims(&request).await {
            Ok(claims) => {
                self.rules.apply(&claims, &mut request);
                debug!(
                    organization = %claims.organization,
                    rewritten_uri = %request.uri,
                    "request scoped to tenant"
                );
                Decision::Rewritten(request)
            }
            Err(failure) => {
                warn!(reason = ?failure, "edge request denied");
                Decision::Denied(failure)
            }
        }
    }

    async fn verified_claims(&self, request: &EdgeRequest) -> Result<Claims, AuthFailure> {
        let token = bearer_token(request.header(AUTHORIZATION_HEADER))?;

        let secret = self
            .secrets
            .get(&self.secret_name)
            .await
            .ok_or(AuthFailure::SecretUnavailable)?;

        verifier::verify(token, &secret)
    }
}
