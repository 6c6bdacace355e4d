//! MailChannels Email API Client
//!
//! Production-ready MailChannels API client with:
//! - Transactional sending (`/tx/v1`) with typed requests and responses
//! - Inbound domain, user and list management (`/inbound/v1`)
//! - Sub-accounts, suppression lists and delivery metrics
//! - Ed25519 webhook signature verification (HTTP message signatures)
//!
//! Every API method returns [`ApiResult`]: expected failures — invalid
//! input, provider errors, network errors — are values carrying a
//! message and, when the provider answered, the HTTP status. Nothing in
//! the request path panics or retries; each call maps to at most one
//! HTTP request.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mailchannels_client::services::emails::SendEmailRequest;
//! use mailchannels_client::MailChannelsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MailChannelsClient::new("your-api-key")?;
//!
//!     let request = SendEmailRequest::new()
//!         .from("sender@example.com")
//!         .to("recipient@example.com")
//!         .subject("Hello from MailChannels")
//!         .html("<p>It works.</p>");
//!
//!     match client.emails().send(request).await {
//!         Ok(response) => println!("accepted: {:?}", response.results),
//!         Err(error) => eprintln!("send failed: {error} ({:?})", error.status_code),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Webhook verification
//!
//! ```rust,no_run
//! use mailchannels_client::webhooks::WebhookVerification;
//! # async fn example(
//! #     client: &mailchannels_client::MailChannelsClient,
//! #     body: String,
//! #     headers: http::HeaderMap,
//! # ) {
//! // `body` must be the raw, unparsed request body.
//! let authentic = client
//!     .webhooks()
//!     .verify(WebhookVerification {
//!         payload: &body,
//!         headers: &headers,
//!         public_key: None, // fetched from the signing-key endpoint
//!     })
//!     .await;
//! // Respond 200 or 400 based on `authentic`.
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod client;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod transport;
pub mod types;

// Services
pub mod services;
pub mod webhooks;

// Internal helpers
mod validate;

// Testing utilities
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use client::MailChannelsClient;
pub use config::{MailChannelsConfig, MailChannelsConfigBuilder};
pub use errors::{ApiError, ApiResult, ConfigurationError, TransportError};

/// Default base URL for the MailChannels API
pub const DEFAULT_BASE_URL: &str = "https://api.mailchannels.net";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Create a client with the given API key
pub fn create_client(api_key: impl Into<String>) -> Result<MailChannelsClient, ConfigurationError> {
    MailChannelsClient::new(api_key)
}

/// Create a client from environment variables
///
/// Reads:
/// - `MAILCHANNELS_API_KEY` - the API key (required)
/// - `MAILCHANNELS_BASE_URL` - base URL override (optional)
pub fn create_client_from_env() -> Result<MailChannelsClient, ConfigurationError> {
    MailChannelsClient::from_env()
}
