//! Configuration for the marketplace client

use crate::{NotifyError, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Prefix for environment variables read by [`ClientConfig::from_env`]
const ENV_PREFIX: &str = "MARKETPLACE";

/// Configuration for the marketplace client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the marketplace, without the webhook prefix
    pub base_url: String,

    /// Timeout for notification requests
    pub timeout: Duration,

    /// Timeout for the health probe
    pub health_timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// User-Agent header for outgoing requests
    pub user_agent: String,

    /// Largest attachment accepted, in bytes. `None` reads files of any size.
    pub max_attachment_bytes: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("marketplace-webhooks/{}", env!("CARGO_PKG_VERSION")),
            max_attachment_bytes: None,
        }
    }
}

/// On-disk representation; every key is optional and overrides the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    health_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    user_agent: Option<String>,
    max_attachment_bytes: Option<u64>,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Defaults overridden by `MARKETPLACE_*` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::default().merge_env()
    }

    /// Defaults, then the TOML file at `path` if given, then the environment
    /// (including `.env`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.merge_env()
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FileConfig =
            toml::from_str(content).map_err(|e| NotifyError::Config(e.to_string()))?;
        let config = Self::default().merge_file(file);
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file on top of the defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NotifyError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `MARKETPLACE_*` environment variables over this configuration
    pub fn merge_env(mut self) -> Result<Self> {
        if let Some(url) = env_var("URL") {
            self.base_url = url;
        }
        if let Some(timeout) = env_secs("TIMEOUT_SECS")? {
            self.timeout = timeout;
        }
        if let Some(timeout) = env_secs("HEALTH_TIMEOUT_SECS")? {
            self.health_timeout = timeout;
        }
        if let Some(timeout) = env_secs("CONNECT_TIMEOUT_SECS")? {
            self.connect_timeout = timeout;
        }
        if let Some(agent) = env_var("USER_AGENT") {
            self.user_agent = agent;
        }
        if let Some(limit) = env_parse::<u64>("MAX_ATTACHMENT_BYTES")? {
            self.max_attachment_bytes = Some(limit);
        }
        Ok(self)
    }

    /// Check that every timeout is non-zero
    pub fn validate(&self) -> Result<()> {
        let timeouts = [
            ("timeout", self.timeout),
            ("health_timeout", self.health_timeout),
            ("connect_timeout", self.connect_timeout),
        ];
        for (name, value) in timeouts {
            if value.is_zero() {
                return Err(NotifyError::Config(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }

    fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.health_timeout_secs {
            self.health_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.connect_timeout_secs {
            self.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = file.user_agent {
            self.user_agent = agent;
        }
        if file.max_attachment_bytes.is_some() {
            self.max_attachment_bytes = file.max_attachment_bytes;
        }
        self
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(format!("{}_{}", ENV_PREFIX, key))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| {
                NotifyError::Config(format!("{}_{}={:?}: {}", ENV_PREFIX, key, raw, e))
            })
        })
        .transpose()
}

fn env_secs(key: &str) -> Result<Option<Duration>> {
    match env_parse::<u64>(key)? {
        Some(0) => Err(NotifyError::Config(format!(
            "{}_{} must be greater than zero",
            ENV_PREFIX, key
        ))),
        secs => Ok(secs.map(Duration::from_secs)),
    }
}

/// Builder for ClientConfig
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Set the marketplace base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the notification timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the notification timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the health probe timeout
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.config.health_timeout = timeout;
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Cap the size of attachments read from disk
    pub fn max_attachment_bytes(mut self, limit: u64) -> Self {
        self.config.max_attachment_bytes = Some(limit);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.health_timeout, Duration::from_secs(5));
        assert!(config.max_attachment_bytes.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .base_url("https://marketplace.example.com")
            .timeout_secs(60)
            .health_timeout(Duration::from_secs(2))
            .max_attachment_bytes(4096)
            .build();

        assert_eq!(config.base_url, "https://marketplace.example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.health_timeout, Duration::from_secs(2));
        assert_eq!(config.max_attachment_bytes, Some(4096));
    }

    #[test]
    fn test_from_toml_str() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://shop.example.com"
            timeout_secs = 12
            max_attachment_bytes = 1048576
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://shop.example.com");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.health_timeout, Duration::from_secs(5));
        assert_eq!(config.max_attachment_bytes, Some(1024 * 1024));
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let result = ClientConfig::from_toml_str("timeout_secs = 0");
        assert!(matches!(result, Err(NotifyError::Config(msg)) if msg.contains("timeout")));

        let config = ClientConfig::builder()
            .health_timeout(Duration::ZERO)
            .build();
        assert!(config.validate().is_err());
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let result = ClientConfig::from_toml_str("retries = 3");
        assert!(matches!(result, Err(NotifyError::Config(_))));
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = ClientConfig::from_toml_file("/nonexistent/marketplace.toml");
        assert!(matches!(result, Err(NotifyError::Config(_))));
    }
}
