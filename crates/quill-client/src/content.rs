//! Read-only Content API client, authenticated by a `key` query parameter.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::admin::{ACCEPT_VERSION, DEFAULT_API_VERSION, DEFAULT_TIMEOUT};
use crate::api::ContentResource;
use crate::endpoint::{self, CONTENT_API_SUFFIX, CONTENT_STRIP, Params};
use crate::error::{Error, Result};
use crate::pipeline;
use crate::transport::{self, HttpRequest, RequestBody, Transport};

/// Content API client.
///
/// # Example
///
/// ```no_run
/// use quill_client::{ContentClient, Params};
///
/// # async fn example() -> quill_client::Result<()> {
/// let client = ContentClient::new("https://example.site", "22444f78447824223cefc48062")?;
/// let posts = client.get("/posts/", Params::new().set("limit", 10), None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentInner>,
}

struct ContentInner {
    base_url: String,
    key: String,
    api_version: HeaderValue,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl ContentClient {
    /// Create a new client builder.
    pub fn builder() -> ContentClientBuilder {
        ContentClientBuilder::new()
    }

    /// Create a client with default settings.
    pub fn new(base_url: impl Into<String>, content_key: impl Into<String>) -> Result<Self> {
        Self::builder()
            .base_url(base_url)
            .content_key(content_key)
            .build()
    }

    /// The canonical Content API base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Access a resource collection such as `posts` or `authors`.
    pub fn resource(&self, name: impl Into<String>) -> ContentResource {
        ContentResource::new(self.clone(), name.into())
    }

    /// Build the full URL for an endpoint.
    ///
    /// `key` comes first; a defined caller `key` replaces it in place.
    pub fn build_url(&self, endpoint: &str, params: &Params) -> Result<Url> {
        let mut query = Params::new().set("key", &self.inner.key);
        for (name, value) in params.defined() {
            query.insert(name, Some(value.to_string()));
        }
        endpoint::build_url(&self.inner.base_url, endpoint, &query)
    }

    /// Build request headers.
    pub fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_VERSION, self.inner.api_version.clone());
        headers
    }

    /// Make a GET request.
    pub async fn get(
        &self,
        endpoint: &str,
        params: Params,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let request = HttpRequest {
            method: Method::GET,
            url: self.build_url(endpoint, &params)?,
            headers: self.build_headers(),
            body: RequestBody::Empty,
        };
        let timeout = timeout.unwrap_or(self.inner.timeout);
        Ok(pipeline::execute(self.inner.transport.as_ref(), request, timeout).await?)
    }
}

impl std::fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for creating a ContentClient.
pub struct ContentClientBuilder {
    base_url: Option<String>,
    content_key: Option<String>,
    api_version: String,
    timeout: Duration,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl ContentClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            content_key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            transport: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn content_key(mut self, key: impl Into<String>) -> Self {
        self.content_key = Some(key.into());
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ContentClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let key = self
            .content_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("content_key is required".to_string()))?;

        let base_url = endpoint::parse_base_url(&base_url, CONTENT_STRIP, CONTENT_API_SUFFIX)?;
        let api_version = HeaderValue::from_str(&self.api_version)
            .map_err(|_| Error::Config(format!("invalid API version '{}'", self.api_version)))?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => transport::default_transport(self.user_agent)?,
        };

        Ok(ContentClient {
            inner: Arc::new(ContentInner {
                base_url,
                key,
                api_version,
                timeout: self.timeout,
                transport,
            }),
        })
    }
}

impl Default for ContentClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ContentClient {
        ContentClient::new("https://example.site/ghost/api/admin/", "content-key").unwrap()
    }

    #[test]
    fn test_builder_requires_key() {
        let result = ContentClient::new("https://example.site", "");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ContentClient::builder().content_key("k").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_admin_suffix_collapses_to_content() {
        assert_eq!(client().base_url(), "https://example.site/ghost/api/content");
    }

    #[test]
    fn test_key_comes_first() {
        let url = client()
            .build_url("/posts/", &Params::new().set("limit", 10))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.site/ghost/api/content/posts/?key=content-key&limit=10"
        );
    }

    #[test]
    fn test_undefined_params_are_skipped() {
        let params = Params::new()
            .set_opt("filter", None::<&str>)
            .set("include", "authors");
        let url = client().build_url("tags/", &params).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "content-key".to_string()),
                ("include".to_string(), "authors".to_string()),
            ]
        );
    }

    #[test]
    fn test_undefined_key_param_does_not_drop_key() {
        let params = Params::new().set_opt("key", None::<String>);
        let url = client().build_url("/posts/", &params).unwrap();
        assert_eq!(url.query(), Some("key=content-key"));
    }

    #[test]
    fn test_caller_key_replaces_configured_key() {
        let params = Params::new().set("key", "other").set("limit", 10);
        let url = client().build_url("/posts/", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.site/ghost/api/content/posts/?key=other&limit=10"
        );
    }

    #[test]
    fn test_headers_only_carry_version() {
        let headers = client().build_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("accept-version").unwrap(), "v5.0");
    }

    #[test]
    fn test_debug_hides_key() {
        assert!(!format!("{:?}", client()).contains("content-key"));
    }
}
