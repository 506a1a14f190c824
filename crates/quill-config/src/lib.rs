//! Configuration system for Quill.
//!
//! Provides TOML-based site configuration with:
//! - Config file layering (user config dir + project-local overrides)
//! - Environment variable overrides (`GHOST_API_URL`, `GHOST_ADMIN_API_KEY`, ...)
//! - Required-field accessors with clear errors for missing values

pub mod discovery;
pub mod env;
pub mod error;
pub mod types;

pub use discovery::{
    ConfigSource, LoadedConfig, load_config, load_config_file, load_config_with_options,
    save_config, xdg_config_dir, xdg_config_path,
};
pub use env::{apply_env, apply_env_with};
pub use error::{ConfigError, Result};
pub use types::{QuillConfig, SiteConfig};
