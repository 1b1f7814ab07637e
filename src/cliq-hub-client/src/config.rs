// src/config.rs
use std::{env, path::PathBuf, time::Duration};

use tracing::{info, warn};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_STORAGE_PATH: &str = ".cliq-hub/storage.json";

pub const API_URL_VAR: &str = "CLIQ_HUB_API_URL";
pub const STORAGE_PATH_VAR: &str = "CLIQ_HUB_STORAGE_PATH";
pub const TIMEOUT_VAR: &str = "CLIQ_HUB_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the hub, without a trailing slash.
    pub api_base_url: String,
    pub storage_path: PathBuf,
    /// `None` lets a stalled request hang until the server gives up.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Reads the `CLIQ_HUB_*` environment, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = var(API_URL_VAR) {
            config.api_base_url = parse_api_url(&raw)?;
        }

        if let Some(raw) = var(STORAGE_PATH_VAR) {
            config.storage_path = PathBuf::from(raw);
        }

        if let Some(raw) = var(TIMEOUT_VAR) {
            config.request_timeout = Some(parse_timeout(&raw)?);
        }

        Ok(config)
    }

    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = parse_api_url(raw)?;
        Ok(self)
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn auth_base(&self) -> String {
        format!("{}/v1/auth", self.base())
    }

    pub fn templates_base(&self) -> String {
        format!("{}/v1/templates", self.base())
    }

    fn base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

fn var(key: &str) -> Option<String> {
    setting(key, env::var(key).ok())
}

fn setting(key: &str, raw: Option<String>) -> Option<String> {
    match raw {
        Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Some(_) => {
            info!("{key} is blank, using default");
            None
        }
        None => {
            info!("{key} not set, using default");
            None
        }
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        warn!("Invalid {API_URL_VAR} value: {e}");
        ConfigError::Invalid {
            key: API_URL_VAR,
            value: raw.to_string(),
            message: e.to_string(),
        }
    })?;

    if url.query().is_some() || url.fragment().is_some() {
        warn!("Invalid {API_URL_VAR} value: query or fragment present");
        return Err(ConfigError::Invalid {
            key: API_URL_VAR,
            value: raw.to_string(),
            message: "base URL may not carry a query or fragment".to_string(),
        });
    }

    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_string()),
        other => {
            warn!("Invalid {API_URL_VAR} scheme: {other}");
            Err(ConfigError::Invalid {
                key: API_URL_VAR,
                value: raw.to_string(),
                message: format!("unsupported scheme {other}"),
            })
        }
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |message: String| {
        warn!("Invalid {TIMEOUT_VAR} value: {message}");
        ConfigError::Invalid {
            key: TIMEOUT_VAR,
            value: raw.to_string(),
            message,
        }
    };

    match raw.parse::<u64>() {
        Ok(0) => Err(invalid("timeout must be at least one second".to_string())),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(invalid(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bases_point_at_local_hub() {
        let config = ClientConfig::default();
        assert_eq!(config.auth_base(), "http://localhost:8080/v1/auth");
        assert_eq!(config.templates_base(), "http://localhost:8080/v1/templates");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn trailing_slash_and_prefix_are_kept_clean() {
        let config = ClientConfig::default()
            .with_api_base_url("https://hub.example.com/api/")
            .unwrap();
        assert_eq!(config.auth_base(), "https://hub.example.com/api/v1/auth");
        assert_eq!(
            config.templates_base(),
            "https://hub.example.com/api/v1/templates"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        let err = ClientConfig::default()
            .with_api_base_url("ftp://hub.example.com")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: API_URL_VAR, .. }));
        assert!(ClientConfig::default().with_api_base_url("not a url").is_err());
    }

    #[test]
    fn rejects_query_and_fragment_in_base_url() {
        for raw in [
            "http://hub.example.com?x=1",
            "http://hub.example.com/api/#top",
            "https://hub.example.com/?",
        ] {
            let err = ClientConfig::default().with_api_base_url(raw).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: API_URL_VAR, .. }),
                "{raw} accepted"
            );
        }
    }

    #[test]
    fn blank_settings_fall_back_to_default() {
        assert_eq!(setting(API_URL_VAR, None), None);
        assert_eq!(setting(API_URL_VAR, Some("   ".to_string())), None);
        assert_eq!(
            setting(API_URL_VAR, Some(" http://hub ".to_string())).as_deref(),
            Some("http://hub")
        );
    }

    #[test]
    fn timeout_must_be_whole_seconds() {
        assert_eq!(parse_timeout("15").unwrap(), Duration::from_secs(15));
        assert!(parse_timeout("1.5").is_err());
        assert!(matches!(
            parse_timeout("0"),
            Err(ConfigError::Invalid { key: TIMEOUT_VAR, .. })
        ));
    }
}
