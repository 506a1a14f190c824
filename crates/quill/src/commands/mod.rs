//! CLI command handlers.

pub mod admin;
pub mod config;
pub mod content;
pub mod token;
pub mod upload;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use quill_client::{AdminClient, ContentClient, Params};
use quill_config::{LoadedConfig, QuillConfig};
use serde_json::Value;
use tracing::warn;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved configuration, CLI overrides applied.
    pub loaded: LoadedConfig,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Resolve config layers and apply CLI overrides on top.
    pub fn load(
        url: Option<String>,
        config_dir: Option<PathBuf>,
        json_output: bool,
        verbose: bool,
    ) -> Result<Self> {
        let mut loaded = quill_config::load_config_with_options(None, config_dir.as_deref())
            .context("failed to load configuration")?;
        for warning in &loaded.warnings {
            warn!("{}", warning);
        }
        if let Some(url) = url {
            loaded.config.site.url = Some(url);
        }
        Ok(Self {
            loaded,
            json_output,
            verbose,
        })
    }

    pub fn config(&self) -> &QuillConfig {
        &self.loaded.config
    }

    /// Build an Admin client from the resolved config.
    pub fn admin_client(&self) -> Result<AdminClient> {
        let config = self.config();
        let mut builder = AdminClient::builder()
            .base_url(config.require_url()?)
            .admin_key(config.require_admin_key()?);
        if let Some(version) = &config.site.api_version {
            builder = builder.api_version(version);
        }
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Build a Content client from the resolved config.
    pub fn content_client(&self) -> Result<ContentClient> {
        let config = self.config();
        let mut builder = ContentClient::builder()
            .base_url(config.require_url()?)
            .content_key(config.require_content_key()?);
        if let Some(version) = &config.site.api_version {
            builder = builder.api_version(version);
        }
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Print a response body, compact with `--json`.
    pub fn print_value(&self, value: &Value) -> Result<()> {
        if self.json_output {
            println!("{}", serde_json::to_string(value)?);
        } else {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }
}

/// Parse a `name=value` argument.
pub fn parse_key_value(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => bail!("expected name=value, got '{}'", raw),
    }
}

/// Collect repeated `--param name=value` arguments.
pub fn parse_params(raw: &[String]) -> Result<Params> {
    raw.iter()
        .map(|p| parse_key_value(p))
        .collect::<Result<Vec<_>>>()
        .map(|pairs| pairs.into_iter().collect())
}

/// Hide all but the first few characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
