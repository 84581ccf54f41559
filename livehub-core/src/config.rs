use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// API base used when neither an override nor a config file provides one
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable that overrides the API base URL
pub const API_URL_ENV: &str = "LIVEHUB_API_URL";

/// On-disk layout of `~/.livehub/config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
}

/// Where the resolved API base came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--api-url` flag or `LIVEHUB_API_URL`
    Override,
    /// `[api] base_url` in the config file
    File,
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Override => write!(f, "override (--api-url / {})", API_URL_ENV),
            ConfigSource::File => write!(f, "config file"),
            ConfigSource::Default => write!(f, "default"),
        }
    }
}

/// Process-wide configuration, resolved once at startup and shared read-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    api_base: String,
    source: ConfigSource,
}

impl HubConfig {
    /// Resolve configuration from an optional override and the default config file
    pub fn resolve(override_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve_with(override_url, &Self::config_path())
    }

    /// Resolve configuration against an explicit config file location
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn resolve_with(override_url: Option<&str>, path: &Path) -> Result<Self, ConfigError> {
        if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
            return Self::with_source(url, ConfigSource::Override);
        }

        if path.exists() {
            let file = Self::read_file(path)?;
            if let Some(url) = file
                .api
                .and_then(|api| api.base_url)
                .filter(|u| !u.trim().is_empty())
            {
                return Self::with_source(url.trim(), ConfigSource::File);
            }
        }

        Self::with_source(DEFAULT_API_BASE, ConfigSource::Default)
    }

    /// Build a config pointing at `base` directly
    pub fn from_base(base: &str) -> Result<Self, ConfigError> {
        Self::with_source(base, ConfigSource::Override)
    }

    /// Get config file path: ~/.livehub/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".livehub/config.toml")
    }

    /// Directory for log files: ~/.livehub/logs
    pub fn log_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".livehub/logs")
    }

    /// API base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn source(&self) -> ConfigSource {
        self.source
    }

    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn with_source(raw: &str, source: ConfigSource) -> Result<Self, ConfigError> {
        let parsed = Url::parse(raw).map_err(|e| ConfigError::invalid_url(raw, e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_url(
                raw,
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        Ok(Self {
            api_base: parsed.as_str().trim_end_matches('/').to_string(),
            source,
        })
    }
}
