//! Admin and Content API clients for Ghost-compatible publishing platforms.
//!
//! Two clients share one request lifecycle:
//!
//! - [`AdminClient`] signs a short-lived HS256 token per call and can read,
//!   write, and upload.
//! - [`ContentClient`] authenticates with a `key` query parameter and only
//!   reads.
//!
//! Both return parsed JSON on success. Every remote or transport failure is
//! normalized into an [`ApiError`]; local misuse (bad admin key, bad token
//! lifetime, bad URL) is reported separately before any I/O.
//!
//! # Example
//!
//! ```no_run
//! use quill_client::{AdminClient, BrowseParams, ContentClient, Result};
//! use serde_json::json;
//!
//! # async fn example() -> Result<()> {
//! let admin = AdminClient::new("https://example.site", "6470e5adf7b2e800012f0001:a1b2c3d4")?;
//!
//! let created = admin
//!     .resource("posts")
//!     .add(json!({"title": "Hello", "status": "draft"}), BrowseParams::new())
//!     .await?;
//! println!("{}", created["posts"][0]["id"]);
//!
//! let content = ContentClient::new("https://example.site", "22444f78447824223cefc48062")?;
//! match content.resource("posts").read_by_slug("missing", BrowseParams::new()).await {
//!     Err(e) if e.is_not_found() => println!("no such post"),
//!     other => println!("{:?}", other?),
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod api;
pub mod content;
pub mod endpoint;
pub mod error;
mod pipeline;
pub mod token;
pub mod transport;
pub mod types;

pub use admin::{
    AdminClient, AdminClientBuilder, DEFAULT_API_VERSION, DEFAULT_TIMEOUT, RequestOptions,
};
pub use api::{AdminResource, BrowseParams, ContentResource, ImageUpload, ImagesApi};
pub use content::{ContentClient, ContentClientBuilder};
pub use endpoint::{ADMIN_API_SUFFIX, CONTENT_API_SUFFIX, Params};
pub use error::{ApiError, AuthError, Error, ErrorEntry, ErrorKind, Result};
pub use token::{AdminKey, TokenOptions};
pub use transport::{
    FilePart, HttpRequest, HttpResponse, MultipartForm, RequestBody, ReqwestTransport, Transport,
    TransportError,
};
pub use types::{PageLimit, Pagination};

pub use reqwest::Method;
