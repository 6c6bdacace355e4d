//! Error types for the MailChannels client.
//!
//! Every public API method resolves to a uniform [`ApiResult`]: the
//! success value on 2xx, or a single [`ApiError`] carrying a
//! human-readable message and, for provider responses, the HTTP status.
//! Expected failures are values, never panics; only client construction
//! can fail before a call is made.

use http::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::transport::ApiResponse;

/// Result type for MailChannels API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Uniform error value returned by every API method.
///
/// `status_code` is `None` for client-side validation failures and
/// network-level failures; it carries the HTTP status when the provider
/// answered with a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable description of the failure
    pub message: String,
    /// HTTP status of the provider response, if one was received
    pub status_code: Option<StatusCode>,
}

impl ApiError {
    /// Create a client-side validation error. The transport is never
    /// touched on this path.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }

    /// Map a non-2xx provider response through an endpoint's
    /// status-message table, appending provider-supplied detail from the
    /// response body when present.
    pub(crate) fn from_response(response: &ApiResponse, messages: StatusMessages) -> Self {
        let status = response.status;
        let base = messages
            .iter()
            .find(|(code, _)| *code == status.as_u16())
            .map(|(_, text)| *text)
            .unwrap_or(UNKNOWN_ERROR);

        let message = match provider_detail(&response.body) {
            Some(detail) => format!("{base} {detail}"),
            None => base.to_string(),
        };

        Self {
            message,
            status_code: Some(status),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self {
            message: error.to_string(),
            status_code: None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self {
            message: error.to_string(),
            status_code: None,
        }
    }
}

/// Per-endpoint table mapping HTTP status codes to fixed messages.
pub(crate) type StatusMessages = &'static [(u16, &'static str)];

/// Fallback message for statuses absent from an endpoint's table. The
/// numeric code is still retained in [`ApiError::status_code`].
pub(crate) const UNKNOWN_ERROR: &str = "Unknown error.";

/// Extract provider-supplied error detail from a response body: the
/// `message` field when present, otherwise the `errors` array joined
/// with `", "`.
fn provider_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;

    if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
        if !message.is_empty() {
            return Some(message.to_string());
        }
    }

    let joined = value
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(|e| e.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    (!joined.is_empty()).then_some(joined)
}

/// Resolve a dispatched call into the envelope, deserializing the body
/// on success.
///
/// The non-2xx branch runs before any body deserialization, so a
/// status-mapped error always wins over a parse error for the same
/// response.
pub(crate) fn unwrap_json<T: DeserializeOwned>(
    result: Result<ApiResponse, TransportError>,
    messages: StatusMessages,
) -> ApiResult<T> {
    let response = result?;
    if !response.status.is_success() {
        return Err(ApiError::from_response(&response, messages));
    }
    Ok(response.json()?)
}

/// Resolve a dispatched call into the envelope for operations whose
/// success carries no body.
pub(crate) fn unwrap_empty(
    result: Result<ApiResponse, TransportError>,
    messages: StatusMessages,
) -> ApiResult<()> {
    let response = result?;
    if !response.status.is_success() {
        return Err(ApiError::from_response(&response, messages));
    }
    Ok(())
}

/// Client construction errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// API key missing or empty
    #[error("API key is missing or empty")]
    MissingApiKey,

    /// API key contains characters not valid in an HTTP header
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    /// Base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The default HTTP transport could not be initialized
    #[error("Failed to initialize HTTP transport: {0}")]
    TransportInit(String),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

/// Network-level errors raised by the transport
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (bad URL or header value)
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message
        message: String,
    },

    /// Any other HTTP-level error
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::HeaderMap;

    const TABLE: StatusMessages = &[(403, "Forbidden."), (404, "Not found.")];

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn test_mapped_status() {
        let error = ApiError::from_response(&response(403, ""), TABLE);
        assert_eq!(error.message, "Forbidden.");
        assert_eq!(error.status_code, Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_unmapped_status_falls_back() {
        let error = ApiError::from_response(&response(418, ""), TABLE);
        assert_eq!(error.message, "Unknown error.");
        assert_eq!(error.status_code.unwrap().as_u16(), 418);
    }

    #[test]
    fn test_provider_message_appended() {
        let error = ApiError::from_response(
            &response(404, r#"{"message":"domain does not exist"}"#),
            TABLE,
        );
        assert_eq!(error.message, "Not found. domain does not exist");
    }

    #[test]
    fn test_provider_errors_list_joined() {
        let error = ApiError::from_response(
            &response(403, r#"{"errors":["bad key","expired"]}"#),
            TABLE,
        );
        assert_eq!(error.message, "Forbidden. bad key, expired");
    }

    #[test]
    fn test_non_json_body_ignored() {
        let error = ApiError::from_response(&response(403, "<html>nope</html>"), TABLE);
        assert_eq!(error.message, "Forbidden.");
    }

    #[test]
    fn test_validation_error_has_no_status() {
        let error = ApiError::validation("No domain provided.");
        assert_eq!(error.message, "No domain provided.");
        assert_eq!(error.status_code, None);
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let error: ApiError = TransportError::Timeout.into();
        assert_eq!(error.message, "Request timed out");
        assert_eq!(error.status_code, None);
    }

    #[test]
    fn test_unwrap_empty_success_and_failure() {
        let ok = unwrap_empty(Ok(response(200, "")), TABLE);
        assert_eq!(ok, Ok(()));

        let err = unwrap_empty(Ok(response(403, "")), TABLE).unwrap_err();
        assert_eq!(err.status_code, Some(StatusCode::FORBIDDEN));
    }
}
