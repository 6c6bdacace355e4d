//! HTTP transport layer for the MailChannels client.
//!
//! The transport is deliberately thin: it sends one request and returns
//! the completed response for *any* status code. Branching on non-2xx
//! statuses belongs to the error-envelope layer, not here, so test
//! doubles can be substituted without re-implementing error mapping.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::errors::TransportError;

/// HTTP transport trait for issuing API requests.
///
/// Implementations return `Ok` for every completed HTTP exchange,
/// including non-2xx responses; `Err` is reserved for network-level
/// failures where no response was received.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the completed response
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// A fully assembled API request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including query string
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Serialized JSON body, if any
    pub body: Option<Bytes>,
}

/// A completed API response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl ApiResponse {
    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a new transport with a pre-built client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportError::from)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::from)?;

        debug!(status = %status, bytes = body.len(), "Received response");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}
