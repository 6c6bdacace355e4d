//! Mock implementations for testing.
//!
//! Provides a programmable transport double that records every request,
//! so tests can assert both on responses and on the requests that were
//! (or were not) issued.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::errors::TransportError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

/// Mock response configuration
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
    /// When set, the transport fails with this error instead of
    /// producing a response
    pub network_failure: bool,
}

impl MockResponse {
    /// Create a 200 response with a JSON body
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self {
            status: 200,
            body: serde_json::to_string(data).unwrap(),
            network_failure: false,
        }
    }

    /// Create a response with the given status and raw body
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            network_failure: false,
        }
    }

    /// Create an empty 200 response
    pub fn ok() -> Self {
        Self::status(200, "{}")
    }

    /// Simulate a network failure (no response received)
    pub fn network_failure() -> Self {
        Self {
            status: 0,
            body: String::new(),
            network_failure: true,
        }
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: Method,
    /// Absolute request URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body, decoded as UTF-8
    pub body: Option<String>,
}

/// Mock HTTP transport for testing
pub struct MockHttpTransport {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpTransport {
    /// Create a new mock transport. With no queued responses it answers
    /// every request with an empty 200.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response
    pub fn enqueue(&self, response: MockResponse) -> &Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Queue a 200 response with a JSON body
    pub fn enqueue_json<T: Serialize>(&self, data: &T) -> &Self {
        self.enqueue(MockResponse::json(data))
    }

    /// Get a shareable handle usable as the client transport
    pub fn shared(&self) -> Arc<dyn HttpTransport> {
        Arc::new(Self {
            responses: self.responses.clone(),
            requests: self.requests.clone(),
        })
    }

    /// All recorded requests, in order
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// The most recent recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests the transport received
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().push(RecordedRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request
                .body
                .as_ref()
                .map(|b| String::from_utf8_lossy(b).into_owned()),
        });

        let response = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(MockResponse::ok);

        if response.network_failure {
            return Err(TransportError::ConnectionFailed {
                message: "mock network failure".into(),
            });
        }

        Ok(ApiResponse {
            status: StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK),
            headers: HeaderMap::new(),
            body: Bytes::from(response.body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_order_and_default() {
        let mock = MockHttpTransport::new();
        mock.enqueue(MockResponse::status(404, "{}"));

        let transport = mock.shared();
        let request = ApiRequest {
            method: Method::GET,
            url: "https://api.mailchannels.net/tx/v1/webhook".into(),
            headers: HeaderMap::new(),
            body: None,
        };

        let first = transport.send(request.clone()).await.unwrap();
        assert_eq!(first.status, StatusCode::NOT_FOUND);

        // Queue exhausted: default empty 200
        let second = transport.send(request).await.unwrap();
        assert_eq!(second.status, StatusCode::OK);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let mock = MockHttpTransport::new();
        mock.enqueue(MockResponse::network_failure());

        let result = mock
            .shared()
            .send(ApiRequest {
                method: Method::GET,
                url: "https://api.mailchannels.net/tx/v1/webhook".into(),
                headers: HeaderMap::new(),
                body: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(TransportError::ConnectionFailed { .. })
        ));
    }
}
