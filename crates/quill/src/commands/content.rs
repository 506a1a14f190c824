//! Content command - public reads against the Content API.

use anyhow::Result;
use clap::Args;

use super::{Context, parse_params};

/// Arguments for the content command.
#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Endpoint path relative to the Content API, e.g. /posts/
    pub endpoint: String,

    /// Query parameter as name=value (repeatable)
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}

/// Run the content command.
pub async fn run(args: ContentArgs, ctx: &Context) -> Result<()> {
    let client = ctx.content_client()?;
    let response = client
        .get(&args.endpoint, parse_params(&args.params)?, None)
        .await?;
    ctx.print_value(&response)
}
