pub mod edge;
pub mod health;
