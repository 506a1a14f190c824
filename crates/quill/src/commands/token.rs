//! Token command - prints a signed Admin authorization value.

use anyhow::Result;
use clap::Args;
use quill_client::token::{self, AdminKey, TokenOptions};

use super::Context;

/// Arguments for the token command.
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Token lifetime in minutes, fractions allowed (at most 5)
    #[arg(short, long, default_value_t = 5.0)]
    pub minutes: f64,

    /// Print only the token, without the scheme prefix
    #[arg(long)]
    pub raw: bool,
}

/// Run the token command.
pub async fn run(args: TokenArgs, ctx: &Context) -> Result<()> {
    let key = AdminKey::parse(ctx.config().require_admin_key()?)?;
    let options = TokenOptions::expires_in(args.minutes);

    let value = if args.raw {
        token::generate_token(&key, &options)?
    } else {
        token::authorization_value(&key, &options)?
    };

    if ctx.json_output {
        let output = serde_json::json!({
            "kid": key.id(),
            "expires_in_minutes": args.minutes,
            "value": value,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}
