//! Admin command - authenticated calls against the Admin API.

use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Args;
use quill_client::{Method, RequestOptions};
use serde_json::Value;

use super::{Context, parse_params};

/// Arguments for the admin command.
#[derive(Args, Debug)]
pub struct AdminArgs {
    /// HTTP method (GET, POST, PUT, DELETE)
    pub method: String,

    /// Endpoint path relative to the Admin API, e.g. /posts/
    pub endpoint: String,

    /// Query parameter as name=value (repeatable)
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// JSON request body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method '{}'", args.method))?;

    let mut options = RequestOptions::new(method).params(parse_params(&args.params)?);
    if let Some(body) = &args.body {
        let body: Value = serde_json::from_str(body).context("--body is not valid JSON")?;
        options = options.body(body);
    }
    if let Some(secs) = args.timeout {
        options = options.timeout(Duration::from_secs(secs));
    }

    let client = ctx.admin_client()?;
    let response = client.request(&args.endpoint, options).await?;
    ctx.print_value(&response)
}
