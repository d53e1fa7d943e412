//! Runtime configuration for the gateway client and the team batcher.

use std::time::Duration;

use crate::cli::types::AccessKey;
use crate::error::{BrError, Result};

pub const DEFAULT_BASE_URL: &str = "https://thegamedeveloper.co.za/brexport/api/api.php";
pub const BASE_URL_ENV_VAR: &str = "BRTOOLS_API_BASE_URL";
pub const COALESCING_ENV_VAR: &str = "BRTOOLS_COALESCING_MS";
pub const ACCESS_KEY_ENV_VAR: &str = "BRTOOLS_ACCESS_KEY";

/// Quiet period after the last team lookup before a batch is sent.
pub const DEFAULT_COALESCING_WINDOW: Duration = Duration::from_millis(300);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub coalescing_window: Duration,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            coalescing_window: DEFAULT_COALESCING_WINDOW,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    /// Defaults overridden by `BRTOOLS_API_BASE_URL` / `BRTOOLS_COALESCING_MS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(ms) = std::env::var(COALESCING_ENV_VAR) {
            config.coalescing_window = Duration::from_millis(ms.trim().parse()?);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_coalescing_window(mut self, window: Duration) -> Self {
        self.coalescing_window = window;
        self
    }
}

/// Resolve the access key from the CLI option or the environment.
pub fn resolve_access_key(access_key: Option<AccessKey>) -> Result<AccessKey> {
    if let Some(key) = access_key {
        return Ok(key);
    }

    match std::env::var(ACCESS_KEY_ENV_VAR) {
        Ok(value) if !value.trim().is_empty() => Ok(AccessKey::new(value.trim())),
        _ => Err(BrError::MissingAccessKey {
            env_var: ACCESS_KEY_ENV_VAR.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.coalescing_window, Duration::from_millis(300));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = GatewayConfig::default()
            .with_base_url("http://localhost:8080/api/")
            .with_coalescing_window(Duration::from_millis(50));
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.coalescing_window, Duration::from_millis(50));
    }

    #[test]
    fn test_resolve_access_key_prefers_option() {
        let key = resolve_access_key(Some(AccessKey::new("from-cli"))).unwrap();
        assert_eq!(key.as_str(), "from-cli");
    }
}
