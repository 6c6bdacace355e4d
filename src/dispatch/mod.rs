//! Request dispatch for the MailChannels client.
//!
//! [`Dispatcher`] is the single point every resource module routes
//! through: it assembles the absolute URL from the fixed base and a
//! versioned path, attaches the `X-API-Key` and content-negotiation
//! headers (per-call overrides win on conflict), serializes the JSON
//! body, and hands the request to the injected transport. It applies no
//! retry, timeout, or pooling policy of its own.

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use serde::Serialize;
use std::sync::Arc;

use crate::config::MailChannelsConfig;
use crate::errors::TransportError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

const X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

/// Shared request dispatcher
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    config: Arc<MailChannelsConfig>,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub(crate) fn new(transport: Arc<dyn HttpTransport>, config: Arc<MailChannelsConfig>) -> Self {
        Self { transport, config }
    }

    fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<String, TransportError> {
        let mut url = self
            .config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidRequest {
                message: e.to_string(),
            })?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url.into())
    }

    fn build_headers(&self, overrides: Option<&HeaderMap>) -> Result<HeaderMap, TransportError> {
        let mut headers = self.config.default_headers.clone();

        let key = HeaderValue::from_str(self.config.api_key.expose()).map_err(|_| {
            TransportError::InvalidRequest {
                message: "API key is not a valid header value".into(),
            }
        })?;
        headers.insert(X_API_KEY, key);

        if let Some(overrides) = overrides {
            for (name, value) in overrides {
                headers.insert(name, value.clone());
            }
        }

        Ok(headers)
    }

    /// Issue a request. The returned [`ApiResponse`] is the completed
    /// exchange for any status code; `Err` means no response arrived.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.build_url(path, query)?;
        let headers = self.build_headers(headers.as_ref())?;

        let body = match body {
            Some(value) => Some(Bytes::from(serde_json::to_vec(value).map_err(|e| {
                TransportError::InvalidRequest {
                    message: e.to_string(),
                }
            })?)),
            None => None,
        };

        self.transport
            .send(ApiRequest {
                method,
                url,
                headers,
                body,
            })
            .await
    }

    /// Issue a GET request
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, TransportError> {
        self.request::<()>(Method::GET, path, query, None, None).await
    }

    /// Issue a POST request
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<ApiResponse, TransportError> {
        self.request(Method::POST, path, query, body, None).await
    }

    /// Issue a PUT request
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<ApiResponse, TransportError> {
        self.request(Method::PUT, path, query, body, None).await
    }

    /// Issue a PATCH request
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<ApiResponse, TransportError> {
        self.request(Method::PATCH, path, query, body, None).await
    }

    /// Issue a DELETE request
    pub async fn delete(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, TransportError> {
        self.request::<()>(Method::DELETE, path, query, None, None)
            .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockHttpTransport;

    fn dispatcher(mock: &MockHttpTransport) -> Dispatcher {
        let config = Arc::new(MailChannelsConfig::new("test-key").unwrap());
        Dispatcher::new(mock.shared(), config)
    }

    #[tokio::test]
    async fn test_url_and_query_assembly() {
        let mock = MockHttpTransport::new();
        let dispatcher = dispatcher(&mock);

        dispatcher
            .get(
                "tx/v1/sub-account",
                &[("limit", "10".into()), ("offset", "5".into())],
            )
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(
            request.url,
            "https://api.mailchannels.net/tx/v1/sub-account?limit=10&offset=5"
        );
        assert_eq!(request.method, Method::GET);
    }

    #[tokio::test]
    async fn test_auth_and_content_headers_attached() {
        let mock = MockHttpTransport::new();
        let dispatcher = dispatcher(&mock);

        dispatcher.get("tx/v1/webhook", &[]).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.headers.get("x-api-key").unwrap(), "test-key");
        assert_eq!(request.headers.get("accept").unwrap(), "application/json");
        assert_eq!(
            request.headers.get("content-type").unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_per_call_headers_win() {
        let mock = MockHttpTransport::new();
        let dispatcher = dispatcher(&mock);

        let mut overrides = HeaderMap::new();
        overrides.insert(
            http::header::ACCEPT,
            HeaderValue::from_static("text/plain"),
        );

        dispatcher
            .request::<()>(Method::GET, "tx/v1/webhook", &[], None, Some(overrides))
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.headers.get("accept").unwrap(), "text/plain");
        assert_eq!(request.headers.get("x-api-key").unwrap(), "test-key");
    }

    #[tokio::test]
    async fn test_body_serialized_as_json() {
        let mock = MockHttpTransport::new();
        let dispatcher = dispatcher(&mock);

        dispatcher
            .post("tx/v1/sub-account", &[], Some(&serde_json::json!({"handle": "acme"})))
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.body.as_deref(), Some(r#"{"handle":"acme"}"#));
    }
}
