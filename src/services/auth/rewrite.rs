//! Tenant scoping of verified requests.
//!
//! The organization always comes from verified claims. Collaborators behind the
//! edge (object retrieval, presigned upload, listing) trust the values written
//! here and do not re-verify the token.

use crate::services::auth::types::Claims;
use crate::services::edge_request::EdgeRequest;

/// Query parameter holding the upload target key.
pub const FILENAME_PARAM: &str = "filename";
/// Query parameter the listing endpoint routes on.
pub const ORG_ID_PARAM: &str = "orgId";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRules {
    pub upload_prefix: String,
    pub list_prefix: String,
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self {
            upload_prefix: "/upload".to_string(),
            list_prefix: "/list".to_string(),
        }
    }
}

impl RewriteRules {
    pub fn new(upload_prefix: impl Into<String>, list_prefix: impl Into<String>) -> Self {
        Self {
            upload_prefix: upload_prefix.into(),
            list_prefix: list_prefix.into(),
        }
    }

    /// Scope `request` to `claims.organization`.
    ///
    /// - object retrieval (any other non-empty uri): `/<org>` is prepended to the uri
    /// - `filename` query parameter, on any route: every value becomes `<org>/<value>`
    /// - list routes: `orgId` is set, replacing whatever the caller sent (repeats included)
    pub fn apply(&self, claims: &Claims, request: &mut EdgeRequest) {
        let organization = claims.organization.as_str();
        let is_upload = request.uri.starts_with(&self.upload_prefix);
        let is_list = request.uri.starts_with(&self.list_prefix);

        if let Some(filename) = request.querystring.get_mut(FILENAME_PARAM) {
            filename.map_values(|value| format!("{organization}/{value}"));
        }

        if request.uri.is_empty() {
            return;
        }

        if is_list {
            request.set_query(ORG_ID_PARAM, organization);
        } else if !is_upload {
            request.uri = format!("/{organization}{}", request.uri);
        }
    }
}
