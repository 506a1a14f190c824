//! Client error types.
//!
//! Two families are kept apart so callers can tell misuse from remote failure:
//!
//! - [`AuthError`]: local credential and token problems, raised before any I/O.
//! - [`ApiError`]: anything that went wrong on or on the way to the remote side,
//!   classified by status code and the platform's error type.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type name used for transport failures with no HTTP response.
pub const NETWORK_ERROR: &str = "NetworkError";

/// Error type name used when a call exceeded its timeout.
pub const TIMEOUT_ERROR: &str = "TimeoutError";

/// Error type name used when a failure carried no recognizable cause.
pub const UNKNOWN_ERROR: &str = "UnknownError";

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Admin key parsing or token signing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read a local file for upload.
    #[error("failed to read '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },
}

impl Error {
    /// The classified remote error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_not_found)
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
            || self.as_api().is_some_and(ApiError::is_authentication_error)
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_rate_limited)
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_server_error)
    }

    /// Check if the call timed out.
    pub fn is_timeout(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_timeout)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Local failures while parsing an admin key or signing a token.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The key string was empty.
    #[error("Admin API key is required")]
    EmptyKey,

    /// The key string had no `id:secret` separator.
    #[error("Admin API key must be in the format 'id:secret'")]
    MissingSeparator,

    /// The id segment was empty.
    #[error("Admin API key id is empty")]
    EmptyId,

    /// The secret segment was empty.
    #[error("Admin API key secret is empty")]
    EmptySecret,

    /// The secret segment was not hexadecimal.
    #[error("Admin API key secret must be hexadecimal")]
    InvalidSecret,

    /// Token lifetime outside the platform's accepted window.
    #[error("Token expiry must be more than 0 and at most {max} minutes, got {minutes}")]
    InvalidExpiry {
        /// Requested lifetime.
        minutes: f64,
        /// Largest accepted lifetime.
        max: f64,
    },

    /// A token segment could not be serialized.
    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

/// One entry of the platform's `{"errors": [...]}` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Platform error type, e.g. `ValidationError`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Extra detail from the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    /// Offending property for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl ErrorEntry {
    /// Create an entry with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Set the error type.
    pub fn with_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }
}

/// Error envelope returned by the platform on non-success responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub errors: Vec<ErrorEntry>,
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    RateLimited,
    Server,
    Network,
    Timeout,
    Unknown,
    Other,
}

/// A remote or transport failure, normalized.
///
/// `status_code` is `0` when no HTTP response was received.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status, or 0 for transport-level failures.
    pub status_code: u16,
    /// Entries from the error envelope, in server order.
    pub errors: Vec<ErrorEntry>,
    /// Error type taken from the first entry.
    pub error_type: Option<String>,
    /// Error code taken from the first entry.
    pub code: Option<String>,
    message: String,
}

impl ApiError {
    /// Build from a non-success HTTP response.
    pub fn from_http_response(status_code: u16, errors: Vec<ErrorEntry>) -> Self {
        let (message, error_type, code) = match errors.first() {
            Some(first) => (
                first.message.clone(),
                first.error_type.clone(),
                first.code.clone(),
            ),
            None => (
                format!("Request failed with status {}", status_code),
                None,
                None,
            ),
        };
        Self {
            status_code,
            errors,
            error_type,
            code,
            message,
        }
    }

    /// Build from a failure that produced no HTTP response.
    pub fn from_transport_failure(cause: impl fmt::Display) -> Self {
        Self::synthetic(NETWORK_ERROR, format!("Network error: {}", cause))
    }

    /// Build from an elapsed call timeout.
    pub fn from_timeout(timeout: Duration) -> Self {
        Self::synthetic(
            TIMEOUT_ERROR,
            format!("Request timeout after {}ms", timeout.as_millis()),
        )
    }

    /// Build for a failure with no recognizable cause.
    pub fn unknown() -> Self {
        Self::synthetic(UNKNOWN_ERROR, "An unknown error occurred".to_string())
    }

    fn synthetic(error_type: &str, message: String) -> Self {
        Self {
            status_code: 0,
            errors: vec![ErrorEntry::new(message.clone()).with_type(error_type)],
            error_type: Some(error_type.to_string()),
            code: None,
            message,
        }
    }

    /// The primary error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    fn has_type(&self, name: &str) -> bool {
        self.error_type.as_deref() == Some(name)
    }

    pub fn is_validation_error(&self) -> bool {
        self.status_code == 400 || self.has_type("ValidationError")
    }

    pub fn is_authentication_error(&self) -> bool {
        self.status_code == 401
    }

    pub fn is_authorization_error(&self) -> bool {
        self.status_code == 403
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404 || self.has_type("NotFoundError")
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.status_code)
    }

    pub fn is_network_error(&self) -> bool {
        self.status_code == 0 && self.has_type(NETWORK_ERROR)
    }

    pub fn is_timeout(&self) -> bool {
        self.status_code == 0 && self.has_type(TIMEOUT_ERROR)
    }

    /// Classify into a single [`ErrorKind`].
    ///
    /// Predicates are checked in a fixed order, so a 400 carrying a
    /// `NotFoundError` type is reported as `Validation`.
    pub fn kind(&self) -> ErrorKind {
        if self.is_timeout() {
            ErrorKind::Timeout
        } else if self.is_network_error() {
            ErrorKind::Network
        } else if self.status_code == 0 && self.has_type(UNKNOWN_ERROR) {
            ErrorKind::Unknown
        } else if self.is_validation_error() {
            ErrorKind::Validation
        } else if self.is_authentication_error() {
            ErrorKind::Authentication
        } else if self.is_authorization_error() {
            ErrorKind::Authorization
        } else if self.is_not_found() {
            ErrorKind::NotFound
        } else if self.is_rate_limited() {
            ErrorKind::RateLimited
        } else if self.is_server_error() {
            ErrorKind::Server
        } else {
            ErrorKind::Other
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status_code == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "API error ({}): {}", self.status_code, self.message)
        }
    }
}

impl std::error::Error for ApiError {}
