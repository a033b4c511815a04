use async_trait::async_trait;

/// Raw HMAC key bytes fetched from the secret store.
///
/// - Key material is intentionally not printable via Debug.
/// - Bytes are zeroed on drop.
#[derive(Clone)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

/// Source of the current signing secret.
///
/// Absence is the only failure signal: unreachable store, unset key, bad value
/// and timeouts all come back as `None`, and the caller denies the request.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn get(&self, name: &str) -> Option<Secret>;
}
