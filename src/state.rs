/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::auth::EdgeAuthorizer;

#[derive(Clone, Debug)]
pub struct AppState {
    pub authorizer: Arc<EdgeAuthorizer>,
}

impl AppState {
    pub fn new(authorizer: Arc<EdgeAuthorizer>) -> Self {
        Self { authorizer }
    }
}
