pub mod kv;
pub mod provider;

pub use kv::KvSecretProvider;
pub use provider::{Secret, SecretProvider};
