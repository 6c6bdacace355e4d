//! Webhook management and signature verification.
//!
//! Covers enrollment of notification endpoints plus verification of
//! inbound webhook requests. Verification collapses every failure cause
//! to a plain `false`; the individual stages log at `debug` level so
//! operators can still see why a request was rejected.

use http::HeaderMap;
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_empty, unwrap_json, ApiError, ApiResult, StatusMessages};
use crate::validate::require;

mod signature;

const WEBHOOK_PATH: &str = "tx/v1/webhook";
const PUBLIC_KEY_PATH: &str = "tx/v1/webhook/public-key";

const ENROLL_ERRORS: StatusMessages = &[
    (400, "The endpoint is not a valid webhook URL."),
    (403, "Forbidden."),
    (409, "The endpoint is already enrolled."),
];

const LIST_ERRORS: StatusMessages = &[(403, "Forbidden.")];

const DELETE_ERRORS: StatusMessages = &[(403, "Forbidden.")];

const SIGNING_KEY_ERRORS: StatusMessages = &[
    (403, "Forbidden."),
    (404, "No signing key found for this id."),
];

/// An inbound webhook request to verify.
///
/// `payload` must be the raw, unmodified request body; `headers` must
/// contain the `content-digest`, `signature` and `signature-input`
/// headers as received. When `public_key` (base64 SPKI, PEM armor
/// accepted) is absent the key is fetched from the signing-key endpoint
/// using the key id carried in `signature-input`.
#[derive(Debug, Clone)]
pub struct WebhookVerification<'a> {
    /// Raw request body
    pub payload: &'a str,
    /// Request headers as received
    pub headers: &'a HeaderMap,
    /// Verification key override
    pub public_key: Option<&'a str>,
}

/// Record shape returned by the webhook listing endpoint
#[derive(Debug, Clone, Deserialize)]
struct WebhookRecord {
    webhook: String,
}

/// Enrolled webhook endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWebhooksResponse {
    /// Enrolled endpoint URLs
    pub webhooks: Vec<String>,
}

/// Signing key returned by the public-key endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SigningKeyResponse {
    /// Key identifier
    pub id: String,
    /// Base64-encoded SPKI public key
    pub key: String,
}

/// Webhooks service
#[derive(Clone)]
pub struct WebhooksService {
    dispatch: Dispatcher,
}

impl WebhooksService {
    /// Create a new webhooks service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// Enroll an endpoint to receive webhook notifications
    #[instrument(skip(self))]
    pub async fn enroll(&self, endpoint: &str) -> ApiResult<()> {
        if let Some(message) = require(endpoint, "No endpoint provided.") {
            return Err(ApiError::validation(message));
        }

        let result = self
            .dispatch
            .post::<()>(WEBHOOK_PATH, &[("endpoint", endpoint.to_string())], None)
            .await;
        unwrap_empty(result, ENROLL_ERRORS)
    }

    /// List enrolled webhook endpoints
    #[instrument(skip(self))]
    pub async fn list(&self) -> ApiResult<ListWebhooksResponse> {
        let result = self.dispatch.get(WEBHOOK_PATH, &[]).await;
        let records: Vec<WebhookRecord> = unwrap_json(result, LIST_ERRORS)?;

        Ok(ListWebhooksResponse {
            webhooks: records.into_iter().map(|r| r.webhook).collect(),
        })
    }

    /// Delete all enrolled webhook endpoints
    #[instrument(skip(self))]
    pub async fn delete(&self) -> ApiResult<()> {
        let result = self.dispatch.delete(WEBHOOK_PATH, &[]).await;
        unwrap_empty(result, DELETE_ERRORS)
    }

    /// Fetch the signing key with the given id
    #[instrument(skip(self))]
    pub async fn signing_key(&self, id: &str) -> ApiResult<SigningKeyResponse> {
        if let Some(message) = require(id, "No key id provided.") {
            return Err(ApiError::validation(message));
        }

        let result = self
            .dispatch
            .get(PUBLIC_KEY_PATH, &[("id", id.to_string())])
            .await;
        unwrap_json(result, SIGNING_KEY_ERRORS)
    }

    /// Verify the authenticity of an inbound webhook request.
    ///
    /// Returns `true` only when the content digest, freshness window and
    /// Ed25519 signature all check out. Callers map the verdict to an
    /// HTTP response status; no intermediate failure state is surfaced.
    #[instrument(skip(self, verification))]
    pub async fn verify(&self, verification: WebhookVerification<'_>) -> bool {
        let WebhookVerification {
            payload,
            headers,
            public_key,
        } = verification;

        if payload.is_empty() {
            debug!("empty webhook payload");
            return false;
        }

        let Some(digest_header) = header(headers, "content-digest") else {
            debug!("missing content-digest header");
            return false;
        };
        let Some(signature_header) = header(headers, "signature") else {
            debug!("missing signature header");
            return false;
        };
        let Some(input_header) = header(headers, "signature-input") else {
            debug!("missing signature-input header");
            return false;
        };

        let Some(digest) = signature::parse_content_digest(digest_header) else {
            debug!("unparseable content-digest header");
            return false;
        };
        if !signature::digest_matches(&digest, payload.as_bytes()) {
            debug!(algorithm = digest.algorithm, "content digest mismatch");
            return false;
        }

        let Some(signature_bytes) = signature::parse_signature(signature_header) else {
            debug!("unparseable signature header");
            return false;
        };
        let Some(input) = signature::parse_signature_input(input_header) else {
            debug!("unparseable signature-input header");
            return false;
        };

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if !signature::is_fresh(input.created, now, signature::SIGNATURE_TOLERANCE_SECS) {
            debug!(created = input.created, now, "signature outside freshness window");
            return false;
        }

        let message = signature::signing_string(digest_header, &input);

        let key = match public_key {
            Some(supplied) => signature::decode_public_key(supplied),
            None => match self.fetch_signing_key(&input.key_id).await {
                Some(fetched) => signature::decode_public_key(&fetched),
                None => None,
            },
        };
        let Some(key) = key else {
            debug!(key_id = %input.key_id, "unable to resolve verification key");
            return false;
        };

        signature::verify_signature(&key, message.as_bytes(), &signature_bytes)
    }

    /// Fetch the verification key for a key id, swallowing failures.
    async fn fetch_signing_key(&self, key_id: &str) -> Option<String> {
        let result = self
            .dispatch
            .get(PUBLIC_KEY_PATH, &[("id", key_id.to_string())])
            .await;
        let response: SigningKeyResponse = unwrap_json(result, SIGNING_KEY_ERRORS).ok()?;
        (!response.key.is_empty()).then_some(response.key)
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}
