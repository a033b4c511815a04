/// Factory: build `EdgeAuthorizer` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::EdgeAuthorizer;
use crate::services::secrets::KvSecretProvider;

pub async fn build_edge_authorizer(config: &Config) -> anyhow::Result<Arc<EdgeAuthorizer>> {
    let secrets = KvSecretProvider::connect(
        &config.valkey_url,
        config.secret_key_prefix.clone(),
        config.secret_fetch_timeout,
    )
    .await?;

    tracing::info!(
        secret_name = %config.signing_secret_name,
        "secret store connected"
    );

    Ok(Arc::new(EdgeAuthorizer::new(
        Arc::new(secrets),
        config.signing_secret_name.clone(),
        config.rewrite_rules.clone(),
    )))
}
