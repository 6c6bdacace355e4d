//! Tests exercising the real reqwest transport against a local server.

use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::MailChannelsConfig;
use crate::MailChannelsClient;

async fn client_for(server: &MockServer) -> MailChannelsClient {
    let config = MailChannelsConfig::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .unwrap();
    MailChannelsClient::with_config(config).unwrap()
}

#[tokio::test]
async fn test_list_webhooks_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tx/v1/webhook"))
        .and(header("x-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"webhook": "https://a.example"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.webhooks().list().await.unwrap();
    assert_eq!(response.webhooks, vec!["https://a.example"]);
}

#[tokio::test]
async fn test_provider_error_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/inbound/v1/domains/x.com"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "api key mismatch"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.domains().delete("x.com").await.unwrap_err();
    assert_eq!(error.status_code, Some(StatusCode::FORBIDDEN));
    assert_eq!(
        error.message,
        "You are not authorized to delete this domain. api key mismatch"
    );
}

#[tokio::test]
async fn test_signing_key_fetch_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tx/v1/webhook/public-key"))
        .and(query_param("id", "k1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "k1", "key": "abc123"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.webhooks().signing_key("k1").await.unwrap();
    assert_eq!(response.id, "k1");
    assert_eq!(response.key, "abc123");
}
