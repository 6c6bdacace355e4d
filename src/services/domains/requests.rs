//! Request types for the domains service.

use serde::{Deserialize, Serialize};

/// Request to provision an inbound domain
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvisionDomainRequest {
    /// Domain name to provision
    pub domain: String,
    /// Subscription the domain is billed against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_handle: Option<String>,
    /// Filtering settings applied at provision time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<DomainSettings>,
}

impl ProvisionDomainRequest {
    /// Create a request for the given domain
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Set the subscription handle
    pub fn subscription_handle(mut self, handle: impl Into<String>) -> Self {
        self.subscription_handle = Some(handle.into());
        self
    }

    /// Set filtering settings
    pub fn settings(mut self, settings: DomainSettings) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Filtering settings for a provisioned domain
#[derive(Debug, Clone, Default, Serialize)]
pub struct DomainSettings {
    /// What to do with messages classified as abusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abuse_policy: Option<AbusePolicy>,
    /// Allow per-recipient overrides of the abuse policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abuse_policy_override: Option<bool>,
}

/// Disposition for messages classified as abusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbusePolicy {
    /// Reject at SMTP time
    Block,
    /// Deliver to quarantine
    Quarantine,
    /// Deliver with a warning header
    Flag,
}

/// Options for listing provisioned domains
#[derive(Debug, Clone, Default)]
pub struct ListDomainsOptions {
    /// Maximum number of domains to return (1 to 5000)
    pub limit: Option<i64>,
    /// Number of domains to skip
    pub offset: Option<i64>,
    /// Restrict the listing to these domain names
    pub domains: Vec<String>,
}

impl ListDomainsOptions {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        for domain in &self.domains {
            query.push(("domain", domain.clone()));
        }
        query
    }
}

/// MX-style downstream delivery record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownstreamAddress {
    /// Delivery port
    pub port: u16,
    /// Record priority, lower is preferred
    pub priority: u16,
    /// Target host
    pub target: String,
    /// Relative weight among records of equal priority
    pub weight: u16,
}
