//! Config command - configuration inspection.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::{Style, style};
use serde::Serialize;

use super::{Context, mask_secret};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show resolved site configuration with keys masked
    Show,

    /// Show which config files are loaded and their precedence
    Which,
}

/// Resolved site settings for JSON output.
#[derive(Debug, Serialize)]
struct ShowOutput {
    url: Option<String>,
    admin_api_key: Option<String>,
    content_api_key: Option<String>,
    api_version: Option<String>,
    timeout_secs: Option<u64>,
    sources: Vec<String>,
    env_overrides: Vec<&'static str>,
    warnings: Vec<String>,
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Which => cmd_which(ctx),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let loaded = &ctx.loaded;
    let site = &loaded.config.site;

    if ctx.json_output {
        let output = ShowOutput {
            url: site.url.clone(),
            admin_api_key: site.admin_api_key.as_deref().map(mask_secret),
            content_api_key: site.content_api_key.as_deref().map(mask_secret),
            api_version: site.api_version.clone(),
            timeout_secs: site.timeout_secs,
            sources: loaded
                .loaded_from()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            env_overrides: loaded.env_overrides.clone(),
            warnings: loaded.warnings.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let unset = || dim.apply_to("(not set)").to_string();

    println!();
    println!("{}", style("Quill Configuration").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();
    println!(
        "  {} {}",
        dim.apply_to("URL:          "),
        site.url.clone().unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        dim.apply_to("Admin key:    "),
        site.admin_api_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        dim.apply_to("Content key:  "),
        site.content_api_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(unset)
    );
    println!(
        "  {} {}",
        dim.apply_to("API version:  "),
        site.api_version
            .clone()
            .unwrap_or_else(|| format!("{} (default)", quill_client::DEFAULT_API_VERSION))
    );
    println!(
        "  {} {}",
        dim.apply_to("Timeout:      "),
        site.timeout_secs
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| format!("{}s (default)", quill_client::DEFAULT_TIMEOUT.as_secs()))
    );

    if !loaded.env_overrides.is_empty() {
        println!();
        println!("  {} {}", dim.apply_to("From env:"), loaded.env_overrides.join(", "));
    }

    if !loaded.warnings.is_empty() {
        let yellow = Style::new().yellow();
        println!();
        println!("Warnings:");
        for w in &loaded.warnings {
            println!("  {} {}", yellow.apply_to("⚠"), w);
        }
    }
    println!();

    Ok(())
}

fn cmd_which(ctx: &Context) -> Result<()> {
    let loaded = &ctx.loaded;

    println!("Config file search order (later overrides earlier):\n");
    for source in &loaded.sources {
        let status = if source.loaded { "✓" } else { "·" };
        println!("  {} {}", status, source.path.display());
    }
    println!();

    let loaded_count = loaded.sources.iter().filter(|s| s.loaded).count();
    if loaded_count == 0 {
        println!("No config files found. Set GHOST_API_URL and a key, or create quill.toml.");
    } else {
        println!("{} config file(s) loaded.", loaded_count);
    }

    if ctx.verbose && !loaded.env_overrides.is_empty() {
        println!("Overridden from env: {}", loaded.env_overrides.join(", "));
    }

    Ok(())
}
