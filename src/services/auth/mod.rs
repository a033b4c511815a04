pub mod bearer;
pub mod constant_time;
pub mod factory;
pub mod handler;
pub mod rewrite;
pub mod types;
pub mod verifier;

pub use factory::build_edge_authorizer;
pub use handler::EdgeAuthorizer;
pub use rewrite::RewriteRules;
pub use types::{AuthFailure, Claims, Decision};
