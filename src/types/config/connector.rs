//! Configuration for the connector process.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::rpc::RetryConfig;

/// Static connector identity and remote endpoint settings.
///
/// Every field has a default, so an empty JSON object (or no config file at
/// all) yields a working configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorConfig {
    /// Owner reported in the connector configuration description.
    #[serde(default = "default_connector_owner")]
    pub connector_owner: String,

    /// Connector name reported to the host.
    #[serde(default = "default_connector_name")]
    pub connector_name: String,

    /// Connector version reported to the host.
    #[serde(default = "default_connector_version")]
    pub connector_version: String,

    /// Base URL of the Analytics Data API.
    #[serde(default = "default_analytics_base_url")]
    pub analytics_base_url: Url,

    /// OAuth token endpoint used for the service-account grant.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    /// Total timeout for a single HTTP request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Retry policy for transient transport failures of the HTTP client.
    #[serde(default)]
    pub retry: RetrySettings,
}

/// Retry block of the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_connector_owner() -> String {
    "DemoOwner".to_string()
}

fn default_connector_name() -> String {
    "GA4Connector".to_string()
}

fn default_connector_version() -> String {
    "1.0".to_string()
}

fn default_analytics_base_url() -> Url {
    // SAFETY: This is a valid URL literal and will always parse successfully.
    Url::parse("https://analyticsdata.googleapis.com").expect("default URL is a valid literal")
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    5_000
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig::new(self.max_retries)
            .with_initial_delay(Duration::from_millis(self.initial_delay_ms))
            .with_max_delay(Duration::from_millis(self.max_delay_ms))
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            connector_owner: default_connector_owner(),
            connector_name: default_connector_name(),
            connector_version: default_connector_version(),
            analytics_base_url: default_analytics_base_url(),
            token_uri: default_token_uri(),
            request_timeout_secs: default_request_timeout_secs(),
            retry: RetrySettings::default(),
        }
    }
}

impl ConnectorConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ConnectorConfig::from_json("{}").unwrap();
        assert_eq!(config.connector_owner, "DemoOwner");
        assert_eq!(config.connector_name, "GA4Connector");
        assert_eq!(config.connector_version, "1.0");
        assert_eq!(
            config.analytics_base_url.as_str(),
            "https://analyticsdata.googleapis.com/"
        );
        assert_eq!(config.token_uri, DEFAULT_TOKEN_URI);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.retry.max_retries, 2);
    }

    #[test]
    fn test_partial_override() {
        let config = ConnectorConfig::from_json(
            r#"{
                "connector_name": "Ga4Staging",
                "analytics_base_url": "http://localhost:8080",
                "retry": { "max_retries": 0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.connector_name, "Ga4Staging");
        assert_eq!(config.connector_owner, "DemoOwner");
        assert_eq!(config.analytics_base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.retry.max_retries, 0);
        assert_eq!(config.retry.initial_delay_ms, 500);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = ConnectorConfig::from_json(r#"{ "analytics_base_url": "not a url" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_retry_settings_conversion() {
        let retry = RetrySettings {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 250,
        }
        .to_retry_config();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(retry.delay_for_attempt(3), Duration::from_millis(250));
    }
}
