//! The HTTP transport seam.
//!
//! Clients never talk to `reqwest` directly; they hand a fully built
//! [`HttpRequest`] to a [`Transport`] and get back the status and raw body.
//! Tests swap in an in-memory transport instead of patching globals.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

use crate::error::Error;

/// Body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Serialized as JSON text; the caller sets the content type.
    Json(serde_json::Value),
    /// Encoded as `multipart/form-data`; the transport picks the boundary.
    Multipart(MultipartForm),
}

/// A file attached to a multipart upload.
#[derive(Clone)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FilePart {
    /// Create a file part under the given form field.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: None,
            data,
        }
    }

    /// Set the part's MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// A multipart form: one file plus plain text fields.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    pub file: FilePart,
    pub fields: Vec<(String, String)>,
}

/// A fully built outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// What came back from the server.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase, possibly empty.
    pub status_text: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response with an empty reason phrase.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: String::new(),
            body: body.into(),
        }
    }

    /// Create a response whose body is the given JSON value.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// Set the reason phrase.
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }
}

/// Failures that produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The transport's own deadline fired.
    #[error("request timed out")]
    TimedOut,

    /// Connection, TLS, or body read failure.
    #[error("{0}")]
    Network(String),

    /// The transport failed without a usable cause.
    #[error("unrecognized transport failure")]
    Unrecognized,
}

/// Sends a request and returns the response or a transport failure.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given user agent.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { http })
    }

    /// Wrap an existing client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(form) => builder.multipart(into_reqwest_form(form)?),
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: body.to_vec(),
        })
    }
}

/// Build the default transport, falling back to a crate user agent.
pub(crate) fn default_transport(
    user_agent: Option<String>,
) -> crate::error::Result<Arc<dyn Transport>> {
    let user_agent =
        user_agent.unwrap_or_else(|| format!("quill-client/{}", env!("CARGO_PKG_VERSION")));
    let transport = ReqwestTransport::new(&user_agent)
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
    Ok(Arc::new(transport))
}

/// Whether `content_type` parses as a MIME type for a multipart part.
pub(crate) fn is_valid_part_content_type(content_type: &str) -> bool {
    reqwest::multipart::Part::bytes(Vec::new())
        .mime_str(content_type)
        .is_ok()
}

fn into_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, TransportError> {
    let FilePart {
        field,
        file_name,
        content_type,
        data,
    } = form.file;

    let mut part = reqwest::multipart::Part::bytes(data).file_name(file_name);
    if let Some(content_type) = content_type {
        part = part.mime_str(&content_type).map_err(classify)?;
    }

    let mut multipart = reqwest::multipart::Form::new().part(field, part);
    for (name, value) in form.fields {
        multipart = multipart.text(name, value);
    }
    Ok(multipart)
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::TimedOut
    } else {
        TransportError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_content_type_validation() {
        assert!(is_valid_part_content_type("image/png"));
        assert!(is_valid_part_content_type("text/plain; charset=utf-8"));
        assert!(!is_valid_part_content_type("image"));
        assert!(!is_valid_part_content_type(""));
    }
}
