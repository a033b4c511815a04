pub mod auth;
pub mod cache;
pub mod edge_request;
pub mod secrets;
