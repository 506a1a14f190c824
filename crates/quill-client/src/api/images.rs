//! Image uploads.

use std::path::Path;

use serde_json::Value;

use crate::admin::AdminClient;
use crate::error::{Error, Result};
use crate::transport::FilePart;

const UPLOAD_ENDPOINT: &str = "/images/upload/";

/// Optional form fields sent with an image.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    /// `image`, `profile_image`, or `icon`.
    pub purpose: Option<String>,
    /// Caller reference echoed back by the server.
    pub reference: Option<String>,
}

/// Images API client.
pub struct ImagesApi {
    client: AdminClient,
}

impl ImagesApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Upload an image from disk.
    pub async fn upload_file(&self, path: impl AsRef<Path>, options: ImageUpload) -> Result<Value> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| Error::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        self.upload(file_name, data, options).await
    }

    /// Upload image bytes under the given file name.
    pub async fn upload(
        &self,
        file_name: impl Into<String>,
        data: Vec<u8>,
        options: ImageUpload,
    ) -> Result<Value> {
        let file_name = file_name.into();
        let mut file = FilePart::new("file", file_name.clone(), data);
        if let Some(mime) = mime_for(&file_name) {
            file = file.with_content_type(mime);
        }

        let mut fields = Vec::new();
        if let Some(purpose) = options.purpose {
            fields.push(("purpose".to_string(), purpose));
        }
        if let Some(reference) = options.reference {
            fields.push(("ref".to_string(), reference));
        }

        self.client
            .upload_multipart(UPLOAD_ENDPOINT, file, fields, None)
            .await
    }
}

/// MIME type for the image extensions the platform accepts.
pub fn mime_for(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" | "svgz" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        _ => None,
    }
}
