//! Response types for the domains service.

use serde::Deserialize;

use super::DownstreamAddress;

/// A provisioned inbound domain
#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    /// Domain name
    pub domain_name: String,
    /// API key scoped to this domain
    #[serde(default)]
    pub api_key: Option<String>,
    /// Subscription the domain is billed against
    #[serde(default)]
    pub subscription_handle: Option<String>,
    /// Active abuse policy
    #[serde(default)]
    pub abuse_policy: Option<String>,
}

/// Response from bulk provisioning
#[derive(Debug, Clone, Deserialize)]
pub struct BulkProvisionResponse {
    /// Per-domain outcomes, in request order
    #[serde(default)]
    pub results: Vec<BulkProvisionResult>,
}

/// Outcome of provisioning one domain in a bulk request
#[derive(Debug, Clone, Deserialize)]
pub struct BulkProvisionResult {
    /// Domain name
    pub domain_name: String,
    /// Provisioning status
    #[serde(default)]
    pub status: Option<String>,
    /// Failure reason, when not provisioned
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response from the domain listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ListDomainsResponse {
    /// Provisioned domains
    #[serde(default)]
    pub domains: Vec<Domain>,
    /// Total number of domains on the account
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// Single-use customer login link
#[derive(Debug, Clone, Deserialize)]
pub struct LoginLinkResponse {
    /// The login URL
    pub login_link: String,
}

/// Downstream address records configured for a domain
#[derive(Debug, Clone, Deserialize)]
pub struct ListDownstreamAddressesResponse {
    /// Configured records
    #[serde(default)]
    pub records: Vec<DownstreamAddress>,
}

/// Response from rotating a domain API key
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateApiKeyResponse {
    /// The newly issued key
    pub key: String,
}

/// A DKIM signing key and the DNS record publishing its public half
#[derive(Debug, Clone, Deserialize)]
pub struct DkimKey {
    /// Selector the key is published under
    pub selector: String,
    /// Base64-encoded public key
    pub public_key: String,
    /// DNS record to publish
    pub dns_record: DnsRecord,
}

/// DNS record description
#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecord {
    /// Record name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record value
    pub value: String,
}

/// DKIM keys configured for a domain
#[derive(Debug, Clone, Deserialize)]
pub struct ListDkimKeysResponse {
    /// Configured keys
    #[serde(default)]
    pub keys: Vec<DkimKey>,
}
