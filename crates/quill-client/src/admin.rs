//! Token-authenticated Admin API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::api::{AdminResource, ImageUpload, ImagesApi};
use crate::endpoint::{self, ADMIN_API_SUFFIX, ADMIN_STRIP, Params};
use crate::error::{Error, Result};
use crate::pipeline;
use crate::token::{self, AdminKey, TokenOptions};
use crate::transport::{self, FilePart, HttpRequest, MultipartForm, RequestBody, Transport};

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default value of the `Accept-Version` header.
pub const DEFAULT_API_VERSION: &str = "v5.0";

/// Header carrying the requested API version.
pub(crate) const ACCEPT_VERSION: &str = "accept-version";

/// Options for a single Admin API call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method, `GET` unless set.
    pub method: Method,
    /// JSON body; its presence adds the JSON content type.
    pub body: Option<Value>,
    pub params: Params,
    /// Per-call timeout overriding the client default.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Options for the given method.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Admin API client.
///
/// Every call signs a fresh token; nothing mutable is shared between calls,
/// so clones can be used concurrently.
///
/// # Example
///
/// ```no_run
/// use quill_client::{AdminClient, Params};
///
/// # async fn example() -> quill_client::Result<()> {
/// let client = AdminClient::new(
///     "https://example.site",
///     "6470e5adf7b2e800012f0001:a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4",
/// )?;
///
/// let drafts = client
///     .get("/posts/", Params::new().set("filter", "status:draft"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminInner>,
}

struct AdminInner {
    base_url: String,
    key: AdminKey,
    token_options: TokenOptions,
    api_version: HeaderValue,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl AdminClient {
    /// Create a new client builder.
    pub fn builder() -> AdminClientBuilder {
        AdminClientBuilder::new()
    }

    /// Create a client with default settings.
    pub fn new(base_url: impl Into<String>, admin_key: impl Into<String>) -> Result<Self> {
        Self::builder()
            .base_url(base_url)
            .admin_key(admin_key)
            .build()
    }

    /// The canonical Admin API base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The default per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access a resource collection such as `posts` or `tags`.
    pub fn resource(&self, name: impl Into<String>) -> AdminResource {
        AdminResource::new(self.clone(), name.into())
    }

    /// Access the images API.
    pub fn images(&self) -> ImagesApi {
        ImagesApi::new(self.clone())
    }

    /// Upload an image from disk to `/images/upload/`.
    pub async fn upload_image(
        &self,
        path: impl AsRef<std::path::Path>,
        options: ImageUpload,
    ) -> Result<Value> {
        self.images().upload_file(path, options).await
    }

    /// Read site settings exposed to admin integrations.
    pub async fn site(&self) -> Result<Value> {
        self.get("/site/", Params::new()).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the full URL for an endpoint.
    pub fn build_url(&self, endpoint: &str, params: &Params) -> Result<Url> {
        endpoint::build_url(&self.inner.base_url, endpoint, params)
    }

    /// Build request headers, signing a fresh token.
    pub fn build_headers(&self, include_content_type: bool) -> Result<HeaderMap> {
        let authorization = token::authorization_value(&self.inner.key, &self.inner.token_options)?;
        let authorization = HeaderValue::from_str(&authorization)
            .map_err(|_| Error::Config("admin key id is not a valid header value".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT_VERSION, self.inner.api_version.clone());
        if include_content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }

    /// Make a request.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let url = self.build_url(endpoint, &options.params)?;
        let headers = self.build_headers(options.body.is_some())?;
        let body = options.body.map_or(RequestBody::Empty, RequestBody::Json);

        let request = HttpRequest {
            method: options.method,
            url,
            headers,
            body,
        };
        self.dispatch(request, options.timeout).await
    }

    /// Make a GET request.
    pub async fn get(&self, endpoint: &str, params: Params) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(Method::GET).params(params))
            .await
    }

    /// Make a POST request.
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(Method::POST).body(body))
            .await
    }

    /// Make a PUT request.
    pub async fn put(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(Method::PUT).body(body))
            .await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.request(endpoint, RequestOptions::new(Method::DELETE))
            .await
    }

    /// POST a multipart form.
    ///
    /// No content type is set here; the transport adds one with the boundary.
    /// A malformed part content type fails with [`Error::Config`] before any I/O.
    pub async fn upload_multipart(
        &self,
        endpoint: &str,
        file: FilePart,
        fields: Vec<(String, String)>,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        if let Some(content_type) = &file.content_type
            && !transport::is_valid_part_content_type(content_type)
        {
            return Err(Error::Config(format!(
                "invalid content type '{}' for file '{}'",
                content_type, file.file_name
            )));
        }

        let request = HttpRequest {
            method: Method::POST,
            url: self.build_url(endpoint, &Params::new())?,
            headers: self.build_headers(false)?,
            body: RequestBody::Multipart(MultipartForm { file, fields }),
        };
        self.dispatch(request, timeout).await
    }

    async fn dispatch(&self, request: HttpRequest, timeout: Option<Duration>) -> Result<Value> {
        let timeout = timeout.unwrap_or(self.inner.timeout);
        Ok(pipeline::execute(self.inner.transport.as_ref(), request, timeout).await?)
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.base_url)
            .field("key", &self.inner.key)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

/// Builder for creating an AdminClient.
pub struct AdminClientBuilder {
    base_url: Option<String>,
    admin_key: Option<String>,
    api_version: String,
    timeout: Duration,
    token_options: TokenOptions,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl AdminClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            admin_key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token_options: TokenOptions::default(),
            user_agent: None,
            transport: None,
        }
    }

    /// Set the site URL. Any form is accepted; see [`AdminClient::base_url`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the `id:secret` admin key.
    pub fn admin_key(mut self, key: impl Into<String>) -> Self {
        self.admin_key = Some(key.into());
        self
    }

    /// Set the `Accept-Version` header value.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the lifetime of signed tokens.
    pub fn token_options(mut self, options: TokenOptions) -> Self {
        self.token_options = options;
        self
    }

    /// Set a custom user agent for the default transport.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use a custom transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AdminClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let admin_key = self
            .admin_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("admin_key is required".to_string()))?;

        let base_url = endpoint::parse_base_url(&base_url, ADMIN_STRIP, ADMIN_API_SUFFIX)?;
        let key = AdminKey::parse(&admin_key)?;
        // A bad lifetime or odd-length secret fails here, not on the first call.
        token::generate_token(&key, &self.token_options)?;

        let api_version = HeaderValue::from_str(&self.api_version)
            .map_err(|_| Error::Config(format!("invalid API version '{}'", self.api_version)))?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => transport::default_transport(self.user_agent)?,
        };

        Ok(AdminClient {
            inner: Arc::new(AdminInner {
                base_url,
                key,
                token_options: self.token_options,
                api_version,
                timeout: self.timeout,
                transport,
            }),
        })
    }
}

impl Default for AdminClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
