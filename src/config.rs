//! Service configuration and credential loading.

use crate::error::{CardGenError, Result};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Default Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GOOGLE_API_KEY"];

/// Overrides the API endpoint (useful for proxies and tests).
pub const BASE_URL_ENV_VAR: &str = "CARDGEN_BASE_URL";

/// Per-request timeout in seconds. Unset means no timeout.
pub const TIMEOUT_ENV_VAR: &str = "CARDGEN_TIMEOUT_SECS";

/// Resolved settings shared by the content and image clients.
///
/// Constructing a `Config` is the only place the credential is read, so a
/// missing key surfaces as [`CardGenError::Configuration`] before any
/// workflow can start.
#[derive(Clone)]
pub struct Config {
    api_key: SecretString,
    base_url: String,
    request_timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Creates a new `ConfigBuilder`.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Loads everything from the environment.
    pub fn from_env() -> Result<Self> {
        ConfigBuilder::new().build()
    }

    /// The API key. Only clients should read this.
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// API base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout, if one was configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Builds an HTTP client honoring the configured timeout.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Fetches model metadata to confirm the key works and the model exists.
    pub(crate) async fn check_model(&self, client: &reqwest::Client, model: &str) -> Result<()> {
        let url = format!("{}/v1beta/models/{}", self.base_url, model);

        let response = client
            .get(&url)
            .header("x-goog-api-key", self.api_key())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        match response.status().as_u16() {
            401 | 403 => Err(CardGenError::Auth("Invalid API key".into())),
            404 => Err(CardGenError::InvalidRequest(
                "Model not found. Verify the model name is correct.".into(),
            )),
            s if !(200..300).contains(&s) => Err(CardGenError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }

    /// Maps a transport error, turning client timeouts into [`CardGenError::Timeout`].
    pub(crate) fn map_transport_error(&self, err: reqwest::Error) -> CardGenError {
        match self.request_timeout {
            Some(timeout) if err.is_timeout() => CardGenError::Timeout(timeout),
            _ => CardGenError::Network(err),
        }
    }
}

/// Builder for [`Config`]. Unset values fall back to the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    request_timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Creates a new builder with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `API_KEY`, then `GOOGLE_API_KEY`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API base URL. Falls back to `CARDGEN_BASE_URL`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets a per-request timeout. Falls back to `CARDGEN_TIMEOUT_SECS`.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Resolves all settings, failing fast when the key is missing.
    pub fn build(self) -> Result<Config> {
        let api_key = self
            .api_key
            .or_else(|| {
                // A set but blank variable must not shadow the next one.
                API_KEY_ENV_VARS.iter().find_map(|var| {
                    std::env::var(var)
                        .ok()
                        .filter(|key| !key.trim().is_empty())
                })
            })
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CardGenError::Configuration(
                    "API_KEY environment variable not set and no API key provided".into(),
                )
            })?;

        let base_url = self
            .base_url
            .or_else(|| std::env::var(BASE_URL_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if base_url.is_empty() {
            return Err(CardGenError::Configuration("base URL must not be empty".into()));
        }

        let request_timeout = match self.request_timeout {
            Some(timeout) => Some(timeout),
            None => match std::env::var(TIMEOUT_ENV_VAR) {
                Ok(raw) => Some(parse_timeout_secs(&raw)?),
                Err(_) => None,
            },
        };

        Ok(Config {
            api_key: SecretString::from(api_key.trim().to_string()),
            base_url,
            request_timeout,
        })
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(CardGenError::Configuration(format!(
            "{TIMEOUT_ENV_VAR} must be a positive number of seconds, got {raw:?}"
        ))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_explicit_values() {
        let config = Config::builder()
            .api_key("test-key")
            .base_url("http://localhost:8080/")
            .request_timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(config.api_key(), "test-key");
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        let err = Config::builder().api_key("   ").build().unwrap_err();
        assert!(matches!(err, CardGenError::Configuration(_)));
    }

    // Tests below mutate process-wide key variables.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn with_key_env<R>(api_key: Option<&str>, google_key: Option<&str>, f: impl FnOnce() -> R) -> R {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<_> = API_KEY_ENV_VARS
            .iter()
            .map(|var| (*var, std::env::var(var).ok()))
            .collect();

        for (var, value) in API_KEY_ENV_VARS.iter().zip([api_key, google_key]) {
            match value {
                Some(v) => std::env::set_var(var, v),
                None => std::env::remove_var(var),
            }
        }
        let result = f();

        for (var, value) in saved {
            match value {
                Some(v) => std::env::set_var(var, v),
                None => std::env::remove_var(var),
            }
        }
        result
    }

    #[test]
    fn test_missing_env_key_is_configuration_error() {
        let result = with_key_env(None, None, || ConfigBuilder::new().build());
        assert!(matches!(result, Err(CardGenError::Configuration(_))));
    }

    #[test]
    fn test_blank_api_key_falls_back_to_google_api_key() {
        let config = with_key_env(Some(""), Some("google-key"), || ConfigBuilder::new().build())
            .unwrap();
        assert_eq!(config.api_key(), "google-key");
    }

    #[test]
    fn test_api_key_takes_precedence() {
        let config = with_key_env(Some("primary"), Some("google-key"), Config::from_env).unwrap();
        assert_eq!(config.api_key(), "primary");
    }

    #[test]
    fn test_blank_env_keys_are_configuration_error() {
        let result = with_key_env(Some("  "), Some(""), || ConfigBuilder::new().build());
        assert!(matches!(result, Err(CardGenError::Configuration(_))));
    }

    #[test]
    fn test_explicit_blank_key_does_not_fall_back_to_env() {
        let result = with_key_env(Some("env-key"), None, || {
            Config::builder().api_key("   ").build()
        });
        assert!(matches!(result, Err(CardGenError::Configuration(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::builder().api_key("super-secret").build().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("45").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_timeout_secs(" 5 ").unwrap(), Duration::from_secs(5));
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("soon").is_err());
    }
}
