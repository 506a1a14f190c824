//! Quill - command-line access to Ghost-compatible Admin and Content APIs
//!
//! Main entry point for the Quill CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{admin, config, content, token, upload};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Quill - command-line access to Ghost-compatible Admin and Content APIs
#[derive(Parser)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Site URL (overrides config files and GHOST_API_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Directory holding config.toml (default: platform config dir)
    #[arg(long, global = true, env = "QUILL_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call an Admin API endpoint
    Admin(admin::AdminArgs),

    /// Read from the public Content API
    Content(content::ContentArgs),

    /// Upload a file to an Admin API endpoint
    Upload(upload::UploadArgs),

    /// Print a freshly signed Admin authorization header value
    Token(token::TokenArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "quill=debug,quill_client=debug,quill_config=debug,info"
    } else {
        "quill=info,quill_client=info,warn"
    };

    let log_dir = cli
        .config_dir
        .clone()
        .or_else(quill_config::xdg_config_dir)
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "quill.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "quill=trace,quill_client=trace,quill_config=trace,info",
                )),
        )
        .init();

    // Create context for commands
    let ctx = commands::Context::load(cli.url, cli.config_dir, cli.json, cli.verbose)?;

    // Dispatch to command handlers
    match cli.command {
        Commands::Admin(args) => admin::run(args, &ctx).await,
        Commands::Content(args) => content::run(args, &ctx).await,
        Commands::Upload(args) => upload::run(args, &ctx).await,
        Commands::Token(args) => token::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
