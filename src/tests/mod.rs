//! Integration-style tests driving the public client surface against
//! the mock transport.

mod client_tests;
mod transport_tests;
mod webhook_tests;

use std::sync::Arc;

use crate::config::MailChannelsConfig;
use crate::mocks::MockHttpTransport;
use crate::MailChannelsClient;

/// A client wired to a fresh mock transport.
pub(crate) fn mock_client() -> (MockHttpTransport, MailChannelsClient) {
    let mock = MockHttpTransport::new();
    let config = MailChannelsConfig::new("test-key").unwrap();
    let transport: Arc<dyn crate::transport::HttpTransport> = mock.shared();
    let client = MailChannelsClient::with_transport(config, transport);
    (mock, client)
}
