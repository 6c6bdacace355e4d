//! Account service information: subscriptions and service status.

use serde::Deserialize;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_json, ApiResult, StatusMessages};

const SERVICE_PATH: &str = "inbound/v1/service";

const SERVICE_ERRORS: StatusMessages = &[(403, "Forbidden.")];

/// A subscription on the account
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    /// Whether the subscription is active
    pub active: bool,
    /// Subscription handle, referenced when provisioning domains
    pub handle: String,
    /// Commercial plan name
    #[serde(default)]
    pub plan: Option<String>,
    /// Maximum number of domains the subscription covers
    #[serde(default)]
    pub domain_limit: Option<i64>,
}

/// Subscriptions on the account
#[derive(Debug, Clone, Deserialize)]
pub struct ListSubscriptionsResponse {
    /// Subscriptions, in listing order
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

/// Current service status
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceStatusResponse {
    /// Status indicator reported by the provider
    pub status: String,
}

/// Service information service
#[derive(Clone)]
pub struct ServiceService {
    dispatch: Dispatcher,
}

impl ServiceService {
    /// Create a new service information service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// List the subscriptions on the account
    #[instrument(skip(self))]
    pub async fn subscriptions(&self) -> ApiResult<ListSubscriptionsResponse> {
        let path = format!("{SERVICE_PATH}/subscriptions");
        let result = self.dispatch.get(&path, &[]).await;
        unwrap_json(result, SERVICE_ERRORS)
    }

    /// Current status of the inbound service
    #[instrument(skip(self))]
    pub async fn status(&self) -> ApiResult<ServiceStatusResponse> {
        let path = format!("{SERVICE_PATH}/status");
        let result = self.dispatch.get(&path, &[]).await;
        unwrap_json(result, SERVICE_ERRORS)
    }
}
