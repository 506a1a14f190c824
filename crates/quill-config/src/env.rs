//! Environment variable overrides.

use crate::{ConfigError, QuillConfig, Result};

/// Site URL.
pub const ENV_URL: &str = "GHOST_API_URL";
/// Admin API key.
pub const ENV_ADMIN_API_KEY: &str = "GHOST_ADMIN_API_KEY";
/// Content API key.
pub const ENV_CONTENT_API_KEY: &str = "GHOST_CONTENT_API_KEY";
/// `Accept-Version` header value.
pub const ENV_API_VERSION: &str = "GHOST_API_VERSION";
/// Request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "GHOST_TIMEOUT_SECS";

/// Apply overrides from the process environment.
///
/// Returns the names of the variables that were applied.
pub fn apply_env(config: &mut QuillConfig) -> Result<Vec<&'static str>> {
    apply_env_with(config, |name| std::env::var(name).ok())
}

/// Apply overrides using a custom lookup. Empty values are ignored.
pub fn apply_env_with<F>(config: &mut QuillConfig, lookup: F) -> Result<Vec<&'static str>>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let mut applied = Vec::new();

    let site = &mut config.site;
    for (name, slot) in [
        (ENV_URL, &mut site.url),
        (ENV_ADMIN_API_KEY, &mut site.admin_api_key),
        (ENV_CONTENT_API_KEY, &mut site.content_api_key),
        (ENV_API_VERSION, &mut site.api_version),
    ] {
        if let Some(value) = get(name) {
            *slot = Some(value);
            applied.push(name);
        }
    }

    if let Some(value) = get(ENV_TIMEOUT_SECS) {
        let secs = value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue {
                field: ENV_TIMEOUT_SECS.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })?;
        site.timeout_secs = Some(secs);
        applied.push(ENV_TIMEOUT_SECS);
    }

    Ok(applied)
}
