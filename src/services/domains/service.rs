//! Domains service implementation.

use serde::Serialize;
use tracing::instrument;

use super::{
    BulkProvisionResponse, DkimKey, Domain, DownstreamAddress, ListDkimKeysResponse,
    ListDomainsOptions, ListDomainsResponse, ListDownstreamAddressesResponse, LoginLinkResponse,
    ProvisionDomainRequest, UpdateApiKeyResponse,
};
use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_empty, unwrap_json, ApiError, ApiResult, StatusMessages};
use crate::types::{ListEntry, ListName};
use crate::validate::{require, validate_limit, validate_offset};

const DOMAINS_PATH: &str = "inbound/v1/domains";

/// Inclusive bounds accepted by the listing endpoint's `limit`.
const LIST_LIMIT: (i64, i64) = (1, 5000);

const PROVISION_ERRORS: StatusMessages = &[
    (400, "The domain could not be provisioned."),
    (402, "The subscription limit has been reached."),
    (403, "Forbidden."),
    (409, "The domain is already provisioned."),
];

const BULK_PROVISION_ERRORS: StatusMessages = &[
    (400, "One or more domains could not be provisioned."),
    (403, "Forbidden."),
];

const LIST_ERRORS: StatusMessages = &[
    (400, "Invalid query parameters."),
    (403, "Forbidden."),
];

const DELETE_ERRORS: StatusMessages = &[
    (401, "Unauthorized."),
    (403, "You are not authorized to delete this domain."),
    (404, "Domain not found."),
];

const LIST_ENTRY_ERRORS: StatusMessages = &[
    (400, "The list entry is not valid."),
    (403, "Forbidden."),
    (404, "Domain not found."),
];

const LOGIN_LINK_ERRORS: StatusMessages = &[(403, "Forbidden."), (404, "Domain not found.")];

const DOWNSTREAM_ERRORS: StatusMessages = &[
    (400, "The downstream address records are not valid."),
    (403, "Forbidden."),
    (404, "Domain not found."),
];

const API_KEY_ERRORS: StatusMessages = &[(403, "Forbidden."), (404, "Domain not found.")];

const DKIM_ERRORS: StatusMessages = &[
    (400, "The DKIM key request is not valid."),
    (403, "Forbidden."),
    (404, "Domain not found."),
    (409, "A DKIM key with this selector already exists."),
];

#[derive(Serialize)]
struct BulkProvisionPayload<'a> {
    domains: &'a [ProvisionDomainRequest],
}

#[derive(Serialize)]
struct ListEntryPayload<'a> {
    list_name: ListName,
    item: &'a str,
}

#[derive(Serialize)]
struct DownstreamPayload<'a> {
    records: &'a [DownstreamAddress],
}

#[derive(Serialize)]
struct DkimKeyPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<&'a str>,
}

/// Domains service
#[derive(Clone)]
pub struct DomainsService {
    dispatch: Dispatcher,
}

impl DomainsService {
    /// Create a new domains service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// Provision an inbound domain
    #[instrument(skip(self, request), fields(domain = %request.domain))]
    pub async fn provision(&self, request: ProvisionDomainRequest) -> ApiResult<Domain> {
        if let Some(message) = require(&request.domain, "No domain provided.") {
            return Err(ApiError::validation(message));
        }

        let result = self.dispatch.post(DOMAINS_PATH, &[], Some(&request)).await;
        unwrap_json(result, PROVISION_ERRORS)
    }

    /// Provision several inbound domains in one call
    #[instrument(skip(self, requests), fields(count = requests.len()))]
    pub async fn bulk_provision(
        &self,
        requests: &[ProvisionDomainRequest],
    ) -> ApiResult<BulkProvisionResponse> {
        if requests.is_empty() {
            return Err(ApiError::validation("No domains provided."));
        }
        if requests.iter().any(|r| r.domain.trim().is_empty()) {
            return Err(ApiError::validation("No domain provided."));
        }

        let payload = BulkProvisionPayload { domains: requests };
        let path = format!("{DOMAINS_PATH}/bulk");
        let result = self.dispatch.post(&path, &[], Some(&payload)).await;
        unwrap_json(result, BULK_PROVISION_ERRORS)
    }

    /// List provisioned domains
    #[instrument(skip(self, options))]
    pub async fn list(&self, options: ListDomainsOptions) -> ApiResult<ListDomainsResponse> {
        if let Some(message) = validate_limit(options.limit, LIST_LIMIT.0, LIST_LIMIT.1)
            .or_else(|| validate_offset(options.offset))
        {
            return Err(ApiError::validation(message));
        }

        let result = self.dispatch.get(DOMAINS_PATH, &options.query()).await;
        unwrap_json(result, LIST_ERRORS)
    }

    /// Remove a provisioned domain
    #[instrument(skip(self))]
    pub async fn delete(&self, domain: &str) -> ApiResult<()> {
        if let Some(message) = require(domain, "No domain provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{DOMAINS_PATH}/{domain}");
        let result = self.dispatch.delete(&path, &[]).await;
        unwrap_empty(result, DELETE_ERRORS)
    }

    /// Add an entry to one of a domain's filtering lists
    #[instrument(skip(self))]
    pub async fn add_list_entry(
        &self,
        domain: &str,
        list_name: ListName,
        item: &str,
    ) -> ApiResult<ListEntry> {
        if let Some(message) = require(domain, "No domain provided.")
            .or_else(|| require(item, "No item provided."))
        {
            return Err(ApiError::validation(message));
        }

        let path = format!("{DOMAINS_PATH}/{domain}/lists");
        let payload = ListEntryPayload { list_name, item };
        let result = self.dispatch.post(&path, &[], Some(&payload)).await;
        unwrap_json(result, LIST_ENTRY_ERRORS)
    }

    /// Create a single-use login link for a domain's filtering console
    #[instrument(skip(self))]
    pub async fn create_login_link(&self, domain: &str) -> ApiResult<LoginLinkResponse> {
        if let Some(message) = require(domain, "No domain provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{DOMAINS_PATH}/{domain}/login-link");
        let result = self.dispatch.get(&path, &[]).await;
        unwrap_json(result, LOGIN_LINK_ERRORS)
    }

    /// Replace the downstream delivery records for a domain
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn set_downstream_address(
        &self,
        domain: &str,
        records: &[DownstreamAddress],
    ) -> ApiResult<()> {
        if let Some(message) = require(domain, "No domain provided.") {
            return Err(ApiError::validation(message));
        }
        if records.is_empty() {
            return Err(ApiError::validation(
                "No downstream address records provided.",
            ));
        }

        let path = format!("{DOMAINS_PATH}/{domain}/downstream-address");
        let payload = DownstreamPayload { records };
        let result = self.dispatch.put(&path, &[], Some(&payload)).await;
        unwrap_empty(result, DOWNSTREAM_ERRORS)
    }

    /// List the downstream delivery records for a domain
    #[instrument(skip(self))]
    pub async fn list_downstream_addresses(
        &self,
        domain: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> ApiResult<ListDownstreamAddressesResponse> {
        if let Some(message) = require(domain, "No domain provided.")
            .or_else(|| validate_limit(limit, 1, 1000))
            .or_else(|| validate_offset(offset))
        {
            return Err(ApiError::validation(message));
        }

        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let path = format!("{DOMAINS_PATH}/{domain}/downstream-address");
        let result = self.dispatch.get(&path, &query).await;
        unwrap_json(result, DOWNSTREAM_ERRORS)
    }

    /// Rotate the API key scoped to a domain
    #[instrument(skip(self))]
    pub async fn update_api_key(&self, domain: &str) -> ApiResult<UpdateApiKeyResponse> {
        if let Some(message) = require(domain, "No domain provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{DOMAINS_PATH}/{domain}/api-key");
        let result = self.dispatch.put::<()>(&path, &[], None).await;
        unwrap_json(result, API_KEY_ERRORS)
    }

    /// Create a DKIM signing key for a sending domain
    #[instrument(skip(self))]
    pub async fn create_dkim_key(
        &self,
        domain: &str,
        selector: Option<&str>,
    ) -> ApiResult<DkimKey> {
        if let Some(message) = require(domain, "No domain provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("tx/v1/domains/{domain}/dkim-keys");
        let payload = DkimKeyPayload { selector };
        let result = self.dispatch.post(&path, &[], Some(&payload)).await;
        unwrap_json(result, DKIM_ERRORS)
    }

    /// List the DKIM signing keys configured for a sending domain
    #[instrument(skip(self))]
    pub async fn list_dkim_keys(&self, domain: &str) -> ApiResult<ListDkimKeysResponse> {
        if let Some(message) = require(domain, "No domain provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("tx/v1/domains/{domain}/dkim-keys");
        let result = self.dispatch.get(&path, &[]).await;
        unwrap_json(result, DKIM_ERRORS)
    }
}
