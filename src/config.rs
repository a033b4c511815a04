/*
 * Responsibility
 * - Load settings from the environment (.env is optional)
 * - Validate them up front (startup fails on missing/invalid values)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::services::auth::RewriteRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Transport limits applied by `middleware::http`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpLimits {
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpLimits {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Secret store
    pub valkey_url: String,
    pub signing_secret_name: String,
    pub secret_key_prefix: String,
    pub secret_fetch_timeout: Duration,

    pub rewrite_rules: RewriteRules,
    pub http_limits: HttpLimits,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(&get("APP_ENV").unwrap_or_else(|| "development".to_string()));

        let valkey_url = get("VALKEY_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("VALKEY_URL"))?;

        let signing_secret_name = get("SIGNING_SECRET_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "signing-key".to_string());

        let secret_key_prefix = get("SECRET_KEY_PREFIX").unwrap_or_default();

        let secret_fetch_timeout = match get("SECRET_FETCH_TIMEOUT_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .ok_or(ConfigError::Invalid("SECRET_FETCH_TIMEOUT_MS"))?,
            None => Duration::from_millis(1000),
        };

        let defaults = RewriteRules::default();
        let upload_prefix = path_prefix(get("UPLOAD_PATH_PREFIX"), defaults.upload_prefix)
            .ok_or(ConfigError::Invalid("UPLOAD_PATH_PREFIX"))?;
        let list_prefix = path_prefix(get("LIST_PATH_PREFIX"), defaults.list_prefix)
            .ok_or(ConfigError::Invalid("LIST_PATH_PREFIX"))?;

        let http_defaults = HttpLimits::default();
        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?,
            None => http_defaults.request_timeout,
        };
        let body_limit_bytes = match get("BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|bytes| *bytes > 0)
                .ok_or(ConfigError::Invalid("BODY_LIMIT_BYTES"))?,
            None => http_defaults.body_limit_bytes,
        };

        Ok(Self {
            addr,
            app_env,
            valkey_url,
            signing_secret_name,
            secret_key_prefix,
            secret_fetch_timeout,
            rewrite_rules: RewriteRules::new(upload_prefix, list_prefix),
            http_limits: HttpLimits {
                request_timeout,
                body_limit_bytes,
            },
        })
    }
}

// An empty or relative prefix would match every uri and disable tenant prefixing.
fn path_prefix(raw: Option<String>, default: String) -> Option<String> {
    match raw {
        None => Some(default),
        Some(p) if p.starts_with('/') && p.len() > 1 => Some(p),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("VALKEY_URL", "redis://localhost:6379")]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.signing_secret_name, "signing-key");
        assert_eq!(config.secret_key_prefix, "");
        assert_eq!(config.secret_fetch_timeout, Duration::from_millis(1000));
        assert_eq!(config.rewrite_rules, RewriteRules::default());
        assert_eq!(config.http_limits, HttpLimits::default());
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("VALKEY_URL", "redis://kv:6379"),
            ("PORT", "8080"),
            ("APP_ENV", "prod"),
            ("SIGNING_SECRET_NAME", "edge-key"),
            ("SECRET_KEY_PREFIX", "staging"),
            ("SECRET_FETCH_TIMEOUT_MS", "250"),
            ("UPLOAD_PATH_PREFIX", "/files/upload"),
            ("LIST_PATH_PREFIX", "/files/list"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("BODY_LIMIT_BYTES", "65536"),
        ])
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(config.signing_secret_name, "edge-key");
        assert_eq!(config.secret_key_prefix, "staging");
        assert_eq!(config.secret_fetch_timeout, Duration::from_millis(250));
        assert_eq!(
            config.rewrite_rules,
            RewriteRules::new("/files/upload", "/files/list")
        );
        assert_eq!(config.http_limits.request_timeout, Duration::from_secs(5));
        assert_eq!(config.http_limits.body_limit_bytes, 65536);
    }

    #[test]
    fn valkey_url_is_required() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("VALKEY_URL"));
    }

    #[test]
    fn rejects_invalid_values() {
        let base = ("VALKEY_URL", "redis://localhost");

        assert_eq!(
            load(&[base, ("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            load(&[base, ("SECRET_FETCH_TIMEOUT_MS", "0")]).unwrap_err(),
            ConfigError::Invalid("SECRET_FETCH_TIMEOUT_MS")
        );
        assert_eq!(
            load(&[base, ("LIST_PATH_PREFIX", "")]).unwrap_err(),
            ConfigError::Invalid("LIST_PATH_PREFIX")
        );
        assert_eq!(
            load(&[base, ("UPLOAD_PATH_PREFIX", "upload")]).unwrap_err(),
            ConfigError::Invalid("UPLOAD_PATH_PREFIX")
        );
        assert_eq!(
            load(&[base, ("REQUEST_TIMEOUT_SECS", "0")]).unwrap_err(),
            ConfigError::Invalid("REQUEST_TIMEOUT_SECS")
        );
        assert_eq!(
            load(&[base, ("BODY_LIMIT_BYTES", "lots")]).unwrap_err(),
            ConfigError::Invalid("BODY_LIMIT_BYTES")
        );
    }

    #[test]
    fn errors_render_key_name() {
        assert_eq!(
            ConfigError::Missing("VALKEY_URL").to_string(),
            "missing configuration: VALKEY_URL"
        );
        assert_eq!(
            ConfigError::Invalid("PORT").to_string(),
            "invalid configuration: PORT"
        );
    }
}
