//! Upload command - multipart file upload through the Admin API.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use quill_client::FilePart;
use quill_client::api::mime_for;

use super::{Context, parse_key_value};

/// Arguments for the upload command.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Endpoint path, e.g. /images/upload/
    pub endpoint: String,

    /// File to upload
    pub file: PathBuf,

    /// Extra form field as name=value (repeatable)
    #[arg(short, long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Form field name for the file
    #[arg(long, default_value = "file")]
    pub file_field: String,
}

/// Run the upload command.
pub async fn run(args: UploadArgs, ctx: &Context) -> Result<()> {
    let fields = args
        .fields
        .iter()
        .map(|f| parse_key_value(f))
        .collect::<Result<Vec<_>>>()?;

    let client = ctx.admin_client()?;

    let data = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    let mut part = FilePart::new(&args.file_field, file_name.clone(), data);
    if let Some(mime) = mime_for(&file_name) {
        part = part.with_content_type(mime);
    }

    let response = client
        .upload_multipart(&args.endpoint, part, fields, None)
        .await?;
    ctx.print_value(&response)
}
