//! Signing-secret lookup backed by the key-value store.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tracing::warn;

use crate::services::{
    cache::{CacheClient, ValkeyClient},
    secrets::provider::{Secret, SecretProvider},
};

/// Key-value backed secret provider.
///
/// Every lookup goes to the store; nothing is cached in-process.
#[derive(Clone)]
pub struct KvSecretProvider<C: CacheClient> {
    cache: Arc<C>,
    // Optional key prefix to avoid collisions across environments
    prefix: String,
    // Upper bound on a single lookup; elapsed counts as absence.
    timeout: Duration,
}

impl KvSecretProvider<ValkeyClient> {
    pub async fn connect(
        url: &str,
        prefix: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, crate::services::cache::CacheError> {
        let client = ValkeyClient::new(url).await?;
        Ok(Self::new_with_cache(Arc::new(client), prefix, timeout))
    }
}

impl<C: CacheClient> KvSecretProvider<C> {
    pub fn new_with_cache(cache: Arc<C>, prefix: impl Into<String>, timeout: Duration) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
            timeout,
        }
    }

    pub fn key(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}:{}", self.prefix, name)
        }
    }
}

#[async_trait]
impl<C: CacheClient> SecretProvider for KvSecretProvider<C> {
    #[tracing::instrument(skip(self))]
    async fn get(&self, name: &str) -> Option<Secret> {
        let key = self.key(name);
        let backend = self.cache.backend_name();

        match tokio::time::timeout(self.timeout, self.cache.get_string(&key)).await {
            Ok(Ok(Some(value))) if !value.is_empty() => Some(Secret::new(value.into_bytes())),
            Ok(Ok(Some(_))) => {
                warn!(backend, key = %key, "signing secret is empty");
                None
            }
            Ok(Ok(None)) => {
                warn!(backend, key = %key, "signing secret is not set");
                None
            }
            Ok(Err(err)) => {
                warn!(backend, key = %key, error = %err, "failed to retrieve signing secret");
                None
            }
            Err(_) => {
                warn!(
                    backend,
                    key = %key,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "signing secret lookup timed out"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cache::{CacheError, CacheResult};
    use std::collections::HashMap;

    #[derive(Clone, Default)]
    struct MapCache {
        values: Arc<HashMap<String, String>>,
    }

    impl MapCache {
        fn with(key: &str, value: &str) -> Self {
            let mut values = HashMap::new();
            values.insert(key.to_string(), value.to_string());
            Self {
                values: Arc::new(values),
            }
        }
    }

    #[async_trait]
    impl CacheClient for MapCache {
        fn backend_name(&self) -> &'static str {
            "memory"
        }

        async fn get_string(&self, key: &str) -> CacheResult<Option<String>> {
            Ok(self.values.get(key).cloned())
        }
    }

    #[derive(Clone)]
    struct DownCache;

    #[async_trait]
    impl CacheClient for DownCache {
        fn backend_name(&self) -> &'static str {
            "down"
        }

        async fn get_string(&self, _key: &str) -> CacheResult<Option<String>> {
            Err(CacheError::BackendConnection("connection refused".into()))
        }
    }

    #[derive(Clone)]
    struct SlowCache;

    #[async_trait]
    impl CacheClient for SlowCache {
        fn backend_name(&self) -> &'static str {
            "slow"
        }

        async fn get_string(&self, _key: &str) -> CacheResult<Option<String>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Some("too-late".into()))
        }
    }

    fn provider<C: CacheClient>(cache: C, prefix: &str) -> KvSecretProvider<C> {
        KvSecretProvider::new_with_cache(Arc::new(cache), prefix, Duration::from_millis(50))
    }

    #[tokio::test]
    async fn returns_secret_when_present() {
        let secrets = provider(MapCache::with("signing-key", "s3cr3t"), "");

        let secret = secrets.get("signing-key").await.expect("secret present");
        assert_eq!(secret.as_bytes(), b"s3cr3t");
    }

    #[tokio::test]
    async fn applies_key_prefix() {
        let secrets = provider(MapCache::with("edge:signing-key", "s3cr3t"), "edge");

        assert_eq!(secrets.key("signing-key"), "edge:signing-key");
        assert!(secrets.get("signing-key").await.is_some());
    }

    #[tokio::test]
    async fn unset_key_is_absent() {
        let secrets = provider(MapCache::default(), "");
        assert!(secrets.get("signing-key").await.is_none());
    }

    #[tokio::test]
    async fn empty_value_is_absent() {
        let secrets = provider(MapCache::with("signing-key", ""), "");
        assert!(secrets.get("signing-key").await.is_none());
    }

    #[tokio::test]
    async fn backend_failure_is_absent() {
        let secrets = provider(DownCache, "");
        assert!(secrets.get("signing-key").await.is_none());
    }

    #[tokio::test]
    async fn slow_backend_is_absent() {
        let secrets = provider(SlowCache, "");
        assert!(secrets.get("signing-key").await.is_none());
    }
}
