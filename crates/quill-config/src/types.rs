//! Configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env::{ENV_ADMIN_API_KEY, ENV_CONTENT_API_KEY, ENV_URL};
use crate::{ConfigError, Result};

/// Root configuration.
///
/// ```toml
/// [site]
/// url = "https://example.site"
/// admin_api_key = "6470e5adf7b2e800012f0001:a1b2..."
/// content_api_key = "22444f78447824223cefc48062"
/// api_version = "v5.0"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuillConfig {
    /// Site connection settings.
    #[serde(default)]
    pub site: SiteConfig,
}

/// Connection settings for one site. Every field may be left to a later layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site URL in any form (bare domain, or with an API path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Admin API key, `id:secret`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_api_key: Option<String>,
    /// Content API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_api_key: Option<String>,
    /// `Accept-Version` header value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Default request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl SiteConfig {
    /// Merge another layer on top of this one (other takes priority).
    pub fn merge(&mut self, other: SiteConfig) {
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.admin_api_key.is_some() {
            self.admin_api_key = other.admin_api_key;
        }
        if other.content_api_key.is_some() {
            self.content_api_key = other.content_api_key;
        }
        if other.api_version.is_some() {
            self.api_version = other.api_version;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }

    /// Whether this layer stores an API key in plain text.
    pub fn has_plaintext_key(&self) -> bool {
        self.admin_api_key.is_some() || self.content_api_key.is_some()
    }
}

impl QuillConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    pub fn merge(&mut self, other: QuillConfig) {
        self.site.merge(other.site);
    }

    /// The site URL, or an error naming where to set it.
    pub fn require_url(&self) -> Result<&str> {
        required(self.site.url.as_deref(), "site.url", ENV_URL)
    }

    /// The Admin API key, or an error naming where to set it.
    pub fn require_admin_key(&self) -> Result<&str> {
        required(
            self.site.admin_api_key.as_deref(),
            "site.admin_api_key",
            ENV_ADMIN_API_KEY,
        )
    }

    /// The Content API key, or an error naming where to set it.
    pub fn require_content_key(&self) -> Result<&str> {
        required(
            self.site.content_api_key.as_deref(),
            "site.content_api_key",
            ENV_CONTENT_API_KEY,
        )
    }

    /// Configured request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.site.timeout_secs.map(Duration::from_secs)
    }
}

fn required<'a>(value: Option<&'a str>, field: &str, env_var: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingField {
            field: field.to_string(),
            hint: format!("the [site] config section or the {} env var", env_var),
        })
}
