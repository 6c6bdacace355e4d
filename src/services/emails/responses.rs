//! Response types for the emails service.

use serde::Deserialize;

/// Response from the send endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailResponse {
    /// Provider-assigned request identifier
    #[serde(default)]
    pub request_id: Option<String>,
    /// Per-recipient delivery results
    #[serde(default)]
    pub results: Vec<SendResult>,
}

/// Delivery result for a single recipient
#[derive(Debug, Clone, Deserialize)]
pub struct SendResult {
    /// Index of the recipient within the request
    #[serde(default)]
    pub index: Option<u32>,
    /// Provider-assigned message identifier
    #[serde(default)]
    pub message_id: Option<String>,
    /// Rejection reason, when not accepted
    #[serde(default)]
    pub reason: Option<String>,
    /// Delivery status reported by the provider
    pub status: String,
}
