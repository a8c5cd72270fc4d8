//! TOML configuration shared by the proxy binary and the client.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::communities::DEFAULT_COMMUNITY;
use crate::error::ConfigError;
use crate::types::SortMode;

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
pub const DEFAULT_UPSTREAM: &str = "https://www.reddit.com";
pub const DEFAULT_USER_AGENT: &str = "Threadist/1.0";
pub const DEFAULT_LIMIT: u32 = 25;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub defaults: ListingDefaults,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub user_agent: String,
    /// No timeout is applied to the upstream fetch unless this is set.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Values the proxy substitutes for absent query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingDefaults {
    pub subreddit: String,
    pub sort: SortMode,
    pub limit: u32,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            subreddit: DEFAULT_COMMUNITY.to_string(),
            sort: SortMode::Hot,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub proxy_url: String,
    /// Sent as a bearer token on every proxy request when present.
    pub anon_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            proxy_url: format!("http://{}", DEFAULT_BIND),
            anon_key: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads an explicit config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            value: format!("{}: {}", path.display(), e),
        })?;

        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("upstream.base_url", &self.upstream.base_url)?;
        check_url("client.proxy_url", &self.client.proxy_url)?;

        if self.upstream.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "upstream.user_agent".to_string(),
                value: self.upstream.user_agent.clone(),
            });
        }

        if self.defaults.limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "defaults.limit".to_string(),
                value: "0".to_string(),
            });
        }

        if self.defaults.subreddit.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "defaults.subreddit".to_string(),
                value: self.defaults.subreddit.clone(),
            });
        }

        Ok(())
    }
}

fn check_url(field: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidValue {
            field: field.to_string(),
            value: format!("{} ({})", value, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.defaults.subreddit, "nosleep");
        assert_eq!(config.defaults.limit, 25);
        assert_eq!(config.upstream.user_agent, "Threadist/1.0");
        assert!(config.upstream.timeout().is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [upstream]
            base_url = "http://localhost:9000"
            timeout_secs = 10

            [defaults]
            sort = "rising"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "http://localhost:9000");
        assert_eq!(config.upstream.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.upstream.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.defaults.sort, SortMode::Rising);
        assert_eq!(config.defaults.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_toml_str("[defaults]\nlimit = 0\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "defaults.limit")
        );

        let err = AppConfig::from_toml_str("[upstream]\nbase_url = \"not a url\"\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "upstream.base_url")
        );

        let err = AppConfig::from_toml_str("[defaults]\nsort = \"top\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/threadist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.server.bind, DEFAULT_BIND);
    }
}
