//! End-to-end webhook verification through the public client surface.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use ed25519_dalek::{Signer, SigningKey};
use http::{HeaderMap, HeaderValue};
use pretty_assertions::assert_eq;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use super::mock_client;
use crate::mocks::MockResponse;
use crate::webhooks::WebhookVerification;

const SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

fn keypair() -> SigningKey {
    SigningKey::from_bytes(&[42u8; 32])
}

fn spki_base64(key: &SigningKey) -> String {
    let mut der = SPKI_PREFIX.to_vec();
    der.extend_from_slice(key.verifying_key().as_bytes());
    BASE64.encode(der)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Sign `payload` the way the provider does and return the three
/// signature headers.
fn signed_headers(key: &SigningKey, payload: &str, created: u64, key_id: &str) -> HeaderMap {
    let digest = BASE64.encode(Sha256::digest(payload.as_bytes()));
    let digest_header = format!("sha-256=:{digest}:");
    let params = format!("(\"content-digest\");created={created};alg=\"ed25519\";keyid=\"{key_id}\"");

    let message =
        format!("\"content-digest\": {digest_header}\n\"@signature-params\": {params}");
    let signature = BASE64.encode(key.sign(message.as_bytes()).to_bytes());

    let mut headers = HeaderMap::new();
    headers.insert(
        "content-digest",
        HeaderValue::from_str(&digest_header).unwrap(),
    );
    headers.insert(
        "signature",
        HeaderValue::from_str(&format!("sig_1=:{signature}:")).unwrap(),
    );
    headers.insert(
        "signature-input",
        HeaderValue::from_str(&format!("sig_1={params}")).unwrap(),
    );
    headers
}

#[tokio::test]
async fn test_verify_with_supplied_key() {
    let (mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered","message_id":"m1"}"#;
    let headers = signed_headers(&key, payload, now_secs(), "k1");
    let spki = spki_base64(&key);

    let authentic = client
        .webhooks()
        .verify(WebhookVerification {
            payload,
            headers: &headers,
            public_key: Some(&spki),
        })
        .await;

    assert!(authentic);
    // No key fetch when the key is supplied
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_verify_rejects_tampered_payload() {
    let (_mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered","message_id":"m1"}"#;
    let headers = signed_headers(&key, payload, now_secs(), "k1");
    let spki = spki_base64(&key);

    let tampered = r#"{"event":"delivered","message_id":"m2"}"#;
    let authentic = client
        .webhooks()
        .verify(WebhookVerification {
            payload: tampered,
            headers: &headers,
            public_key: Some(&spki),
        })
        .await;

    assert!(!authentic);
}

#[tokio::test]
async fn test_verify_rejects_wrong_key() {
    let (_mock, client) = mock_client();
    let key = keypair();
    let other = SigningKey::from_bytes(&[9u8; 32]);
    let payload = r#"{"event":"delivered"}"#;
    let headers = signed_headers(&key, payload, now_secs(), "k1");
    let spki = spki_base64(&other);

    let authentic = client
        .webhooks()
        .verify(WebhookVerification {
            payload,
            headers: &headers,
            public_key: Some(&spki),
        })
        .await;

    assert!(!authentic);
}

#[tokio::test]
async fn test_verify_tolerance_boundary() {
    let (_mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered"}"#;
    let spki = spki_base64(&key);

    // Exactly at the tolerance: accepted
    let headers = signed_headers(&key, payload, now_secs() - 300, "k1");
    assert!(
        client
            .webhooks()
            .verify(WebhookVerification {
                payload,
                headers: &headers,
                public_key: Some(&spki),
            })
            .await
    );

    // One second past the tolerance: rejected
    let headers = signed_headers(&key, payload, now_secs() - 301, "k1");
    assert!(
        !client
            .webhooks()
            .verify(WebhookVerification {
                payload,
                headers: &headers,
                public_key: Some(&spki),
            })
            .await
    );
}

#[tokio::test]
async fn test_verify_accepts_future_timestamp() {
    // The freshness window only looks backwards; a skewed-ahead sender
    // clock does not invalidate the signature.
    let (_mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered"}"#;
    let headers = signed_headers(&key, payload, now_secs() + 600, "k1");
    let spki = spki_base64(&key);

    assert!(
        client
            .webhooks()
            .verify(WebhookVerification {
                payload,
                headers: &headers,
                public_key: Some(&spki),
            })
            .await
    );
}

#[tokio::test]
async fn test_verify_rejects_unknown_digest_algorithm() {
    let (_mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered"}"#;
    let spki = spki_base64(&key);

    // Re-sign with a sha-512 label so only the algorithm is wrong
    let digest = BASE64.encode(Sha256::digest(payload.as_bytes()));
    let digest_header = format!("sha-512=:{digest}:");
    let created = now_secs();
    let params =
        format!("(\"content-digest\");created={created};alg=\"ed25519\";keyid=\"k1\"");
    let message =
        format!("\"content-digest\": {digest_header}\n\"@signature-params\": {params}");
    let signature = BASE64.encode(key.sign(message.as_bytes()).to_bytes());

    let mut headers = HeaderMap::new();
    headers.insert(
        "content-digest",
        HeaderValue::from_str(&digest_header).unwrap(),
    );
    headers.insert(
        "signature",
        HeaderValue::from_str(&format!("sig_1=:{signature}:")).unwrap(),
    );
    headers.insert(
        "signature-input",
        HeaderValue::from_str(&format!("sig_1={params}")).unwrap(),
    );

    assert!(
        !client
            .webhooks()
            .verify(WebhookVerification {
                payload,
                headers: &headers,
                public_key: Some(&spki),
            })
            .await
    );
}

#[tokio::test]
async fn test_verify_rejects_missing_headers() {
    let (_mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered"}"#;
    let spki = spki_base64(&key);

    for dropped in ["content-digest", "signature", "signature-input"] {
        let mut headers = signed_headers(&key, payload, now_secs(), "k1");
        headers.remove(dropped);

        assert!(
            !client
                .webhooks()
                .verify(WebhookVerification {
                    payload,
                    headers: &headers,
                    public_key: Some(&spki),
                })
                .await,
            "verification must fail without {dropped}"
        );
    }
}

#[tokio::test]
async fn test_verify_fetches_key_by_id() {
    let (mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered"}"#;
    let headers = signed_headers(&key, payload, now_secs(), "k1");
    mock.enqueue_json(&json!({"id": "k1", "key": spki_base64(&key)}));

    let authentic = client
        .webhooks()
        .verify(WebhookVerification {
            payload,
            headers: &headers,
            public_key: None,
        })
        .await;

    assert!(authentic);
    assert_eq!(mock.request_count(), 1);
    let sent = mock.last_request().unwrap();
    assert_eq!(
        sent.url,
        "https://api.mailchannels.net/tx/v1/webhook/public-key?id=k1"
    );
}

#[tokio::test]
async fn test_verify_fails_when_key_fetch_fails() {
    let (mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered"}"#;
    let headers = signed_headers(&key, payload, now_secs(), "k1");
    mock.enqueue(MockResponse::network_failure());

    let authentic = client
        .webhooks()
        .verify(WebhookVerification {
            payload,
            headers: &headers,
            public_key: None,
        })
        .await;

    assert!(!authentic);
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_verify_accepts_pem_armored_key() {
    let (_mock, client) = mock_client();
    let key = keypair();
    let payload = r#"{"event":"delivered"}"#;
    let headers = signed_headers(&key, payload, now_secs(), "k1");
    let pem = format!(
        "-----BEGIN PUBLIC KEY-----\n{}\n-----END PUBLIC KEY-----",
        spki_base64(&key)
    );

    assert!(
        client
            .webhooks()
            .verify(WebhookVerification {
                payload,
                headers: &headers,
                public_key: Some(&pem),
            })
            .await
    );
}
