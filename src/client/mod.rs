//! MailChannels client implementation.
//!
//! Provides the main entry point for interacting with the MailChannels
//! Email API. The client is cheap to clone; every clone shares the same
//! configuration and transport, and concurrent calls against one client
//! are safe and unordered relative to each other.

use std::sync::Arc;

use crate::config::MailChannelsConfig;
use crate::dispatch::Dispatcher;
use crate::errors::ConfigurationError;
use crate::services::{
    DomainsService, EmailsService, ListsService, MetricsService, ServiceService,
    SubAccountsService, SuppressionsService, UsersService,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::webhooks::WebhooksService;

/// Main MailChannels client
#[derive(Clone)]
pub struct MailChannelsClient {
    config: Arc<MailChannelsConfig>,
    dispatch: Dispatcher,
    emails: EmailsService,
    domains: DomainsService,
    webhooks: WebhooksService,
    sub_accounts: SubAccountsService,
    suppressions: SuppressionsService,
    metrics: MetricsService,
    users: UsersService,
    lists: ListsService,
    service: ServiceService,
}

impl MailChannelsClient {
    /// Create a client with the given API key and the default transport.
    ///
    /// Fails synchronously when the key is missing or empty; no request
    /// is ever issued with an unusable key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::with_config(MailChannelsConfig::new(api_key)?)
    }

    /// Create a client with an explicit configuration
    pub fn with_config(config: MailChannelsConfig) -> Result<Self, ConfigurationError> {
        let transport = ReqwestTransport::new(config.timeout)
            .map_err(|e| ConfigurationError::TransportInit(e.to_string()))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with an injected transport. Useful for tests and
    /// for callers that manage their own connection pool.
    pub fn with_transport(config: MailChannelsConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let config = Arc::new(config);
        let dispatch = Dispatcher::new(transport, config.clone());

        Self {
            emails: EmailsService::new(dispatch.clone()),
            domains: DomainsService::new(dispatch.clone()),
            webhooks: WebhooksService::new(dispatch.clone()),
            sub_accounts: SubAccountsService::new(dispatch.clone()),
            suppressions: SuppressionsService::new(dispatch.clone()),
            metrics: MetricsService::new(dispatch.clone()),
            users: UsersService::new(dispatch.clone()),
            lists: ListsService::new(dispatch.clone()),
            service: ServiceService::new(dispatch.clone()),
            config,
            dispatch,
        }
    }

    /// Create a client from environment variables
    ///
    /// Reads `MAILCHANNELS_API_KEY` and, optionally,
    /// `MAILCHANNELS_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::with_config(MailChannelsConfig::from_env()?)
    }

    /// Get the client configuration
    pub fn config(&self) -> &MailChannelsConfig {
        &self.config
    }

    /// Low-level request dispatcher, for endpoints not covered by the
    /// typed services
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatch
    }

    /// Transactional email sending
    pub fn emails(&self) -> &EmailsService {
        &self.emails
    }

    /// Inbound domain provisioning and DKIM management
    pub fn domains(&self) -> &DomainsService {
        &self.domains
    }

    /// Webhook enrollment and signature verification
    pub fn webhooks(&self) -> &WebhooksService {
        &self.webhooks
    }

    /// Tenant sub-accounts and their credentials
    pub fn sub_accounts(&self) -> &SubAccountsService {
        &self.sub_accounts
    }

    /// Recipient suppression list
    pub fn suppressions(&self) -> &SuppressionsService {
        &self.suppressions
    }

    /// Delivery and engagement metrics
    pub fn metrics(&self) -> &MetricsService {
        &self.metrics
    }

    /// Inbound recipient users
    pub fn users(&self) -> &UsersService {
        &self.users
    }

    /// Account-level filtering lists
    pub fn lists(&self) -> &ListsService {
        &self.lists
    }

    /// Subscriptions and service status
    pub fn service(&self) -> &ServiceService {
        &self.service
    }
}

impl std::fmt::Debug for MailChannelsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailChannelsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
