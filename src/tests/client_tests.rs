//! End-to-end envelope behavior through the public client surface.

use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::mock_client;
use crate::mocks::MockResponse;
use crate::services::domains::ListDomainsOptions;
use crate::services::emails::SendEmailRequest;

#[tokio::test]
async fn test_send_email_success() {
    let (mock, client) = mock_client();
    mock.enqueue_json(&json!({
        "results": [
            {"message_id": "m1", "status": "sent"}
        ]
    }));

    let request = SendEmailRequest::new()
        .from("a@x.com")
        .to("b@x.com")
        .subject("s")
        .html("<p>hi</p>");

    let response = client.emails().send(request).await.unwrap();
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].message_id.as_deref(), Some("m1"));
    assert_eq!(response.results[0].status, "sent");

    let sent = mock.last_request().unwrap();
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.url, "https://api.mailchannels.net/tx/v1/send");

    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["from"]["email"], "a@x.com");
    assert_eq!(body["personalizations"][0]["to"][0]["email"], "b@x.com");
    assert_eq!(body["content"][0]["type"], "text/html");
}

#[tokio::test]
async fn test_send_email_missing_sender_short_circuits() {
    let (mock, client) = mock_client();

    let request = SendEmailRequest::new()
        .to("b@x.com")
        .subject("s")
        .html("<p>hi</p>");

    let error = client.emails().send(request).await.unwrap_err();
    assert_eq!(error.message, "No sender provided.");
    assert_eq!(error.status_code, None);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_list_domains_limit_out_of_range_short_circuits() {
    let (mock, client) = mock_client();

    let error = client
        .domains()
        .list(ListDomainsOptions {
            limit: Some(5001),
            ..ListDomainsOptions::default()
        })
        .await
        .unwrap_err();

    assert_eq!(error.message, "The limit must be a number between 1 and 5000.");
    assert_eq!(error.status_code, None);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_delete_domain_forbidden_is_mapped() {
    let (mock, client) = mock_client();
    mock.enqueue(MockResponse::status(403, ""));

    let error = client.domains().delete("x.com").await.unwrap_err();
    assert_eq!(error.status_code, Some(StatusCode::FORBIDDEN));
    assert_eq!(error.message, "You are not authorized to delete this domain.");

    let sent = mock.last_request().unwrap();
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.url, "https://api.mailchannels.net/inbound/v1/domains/x.com");
}

#[tokio::test]
async fn test_unmapped_status_falls_back_to_unknown_error() {
    let (mock, client) = mock_client();
    mock.enqueue(MockResponse::status(418, ""));

    let error = client.domains().delete("x.com").await.unwrap_err();
    assert_eq!(error.message, "Unknown error.");
    assert_eq!(error.status_code.unwrap().as_u16(), 418);
}

#[tokio::test]
async fn test_provider_detail_appended_to_mapped_message() {
    let (mock, client) = mock_client();
    mock.enqueue(MockResponse::status(
        404,
        r#"{"message":"x.com is not provisioned"}"#,
    ));

    let error = client.domains().delete("x.com").await.unwrap_err();
    assert_eq!(error.message, "Domain not found. x.com is not provisioned");
}

#[tokio::test]
async fn test_network_failure_yields_error_without_status() {
    let (mock, client) = mock_client();
    mock.enqueue(MockResponse::network_failure());

    let error = client.domains().delete("x.com").await.unwrap_err();
    assert_eq!(error.status_code, None);
    assert!(error.message.contains("Connection failed"));
    // The call was attempted exactly once, with no retry
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_auth_header_sent_on_every_request() {
    let (mock, client) = mock_client();
    mock.enqueue_json(&json!({"results": []}));

    let request = SendEmailRequest::new()
        .from("a@x.com")
        .to("b@x.com")
        .subject("s")
        .text("hi");
    client.emails().send(request).await.unwrap();

    let sent = mock.last_request().unwrap();
    assert_eq!(sent.headers.get("x-api-key").unwrap(), "test-key");
    assert_eq!(sent.headers.get("accept").unwrap(), "application/json");
}

#[tokio::test]
async fn test_dry_run_flag_becomes_query_parameter() {
    let (mock, client) = mock_client();
    mock.enqueue_json(&json!({"results": []}));

    let request = SendEmailRequest::new()
        .from("a@x.com")
        .to("b@x.com")
        .subject("s")
        .text("hi")
        .dry_run(true);
    client.emails().send(request).await.unwrap();

    let sent = mock.last_request().unwrap();
    assert_eq!(
        sent.url,
        "https://api.mailchannels.net/tx/v1/send?dry-run=true"
    );
}
