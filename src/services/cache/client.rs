//! Key-value client interface used by higher-level services (signing secret lookup).
use async_trait::async_trait;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Store-layer errors (transport/command/value).
///
/// Note:
/// - Kept independent from `AppError` so callers decide how to fail.
///   Secret lookup fails closed: every variant becomes "secret unavailable".
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
    #[error("cache value error: {0}")]
    InvalidValue(String),
}

/// A minimal, read-only key-value interface.
///
/// The gate never writes to the store, so the surface is a single string `GET`.
///
/// Implementations must be cheap to clone (typically `Arc<...>` inside)
#[async_trait]
pub trait CacheClient: Clone + Send + Sync + 'static {
    // Returns the cache backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Get UTF-8 string value. `Ok(None)` when the key is unset.
    async fn get_string(&self, key: &str) -> CacheResult<Option<String>>;
}
