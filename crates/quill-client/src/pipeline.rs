//! Request lifecycle shared by both clients.
//!
//! Clients only decide how a request is addressed and which headers it
//! carries. Sending under a deadline, reading the response, and turning every
//! failure into an [`ApiError`] happen here.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, ErrorEntry, ErrorEnvelope};
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

/// Send `request` and interpret the response.
///
/// The deadline covers connect, send, and reading the whole body. When it
/// fires the in-flight future is dropped, which aborts the I/O.
pub(crate) async fn execute(
    transport: &dyn Transport,
    request: HttpRequest,
    timeout: Duration,
) -> Result<Value, ApiError> {
    let method = request.method.clone();
    let path = request.url.path().to_string();
    debug!(%method, %path, timeout_ms = timeout.as_millis() as u64, "sending request");

    let response = match tokio::time::timeout(timeout, transport.send(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(TransportError::TimedOut)) | Err(_) => {
            warn!(%method, %path, timeout_ms = timeout.as_millis() as u64, "request timed out");
            return Err(ApiError::from_timeout(timeout));
        }
        Ok(Err(TransportError::Network(cause))) => {
            warn!(%method, %path, error = %cause, "request failed before a response");
            return Err(ApiError::from_transport_failure(cause));
        }
        Ok(Err(TransportError::Unrecognized)) => {
            warn!(%method, %path, "request failed without a cause");
            return Err(ApiError::unknown());
        }
    };

    debug!(%method, %path, status = response.status, "received response");
    interpret(response)
}

/// Turn a received response into data or a classified error.
pub(crate) fn interpret(response: HttpResponse) -> Result<Value, ApiError> {
    if !(200..300).contains(&response.status) {
        let err = ApiError::from_http_response(response.status, error_entries(&response));
        warn!(status = err.status_code, error_type = ?err.error_type, "API returned an error");
        return Err(err);
    }

    if response.status == 204 {
        return Ok(empty_result());
    }

    serde_json::from_slice(&response.body).map_err(ApiError::from_transport_failure)
}

/// Entries from the error envelope, or one synthesized from the status line.
fn error_entries(response: &HttpResponse) -> Vec<ErrorEntry> {
    match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => envelope.errors,
        Err(_) => {
            let message = if response.status_text.is_empty() {
                format!("HTTP {}", response.status)
            } else {
                response.status_text.clone()
            };
            vec![ErrorEntry::new(message)]
        }
    }
}

fn empty_result() -> Value {
    Value::Object(serde_json::Map::new())
}
