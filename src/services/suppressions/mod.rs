//! Suppression-list service.
//!
//! The suppression list holds recipients that must not be mailed again,
//! either account-wide or per message category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_empty, unwrap_json, ApiError, ApiResult, StatusMessages};
use crate::validate::{require, validate_limit, validate_offset};

const SUPPRESSION_PATH: &str = "tx/v1/suppression-list";

const CREATE_ERRORS: StatusMessages = &[
    (400, "One or more suppression entries are not valid."),
    (403, "Forbidden."),
];

const LIST_ERRORS: StatusMessages = &[
    (400, "Invalid query parameters."),
    (403, "Forbidden."),
];

const DELETE_ERRORS: StatusMessages = &[
    (403, "Forbidden."),
    (404, "No suppression entry found for this recipient."),
];

/// Message categories a suppression applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionType {
    /// One-to-one messages (receipts, password resets)
    Transactional,
    /// Bulk messages (newsletters, announcements)
    NonTransactional,
}

/// Entry to add to the suppression list
#[derive(Debug, Clone, Serialize)]
pub struct SuppressionEntry {
    /// Recipient address or domain pattern
    pub address: String,
    /// Free-form note on why the recipient is suppressed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Categories the suppression applies to; empty means all
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<SuppressionType>,
}

impl SuppressionEntry {
    /// Create an entry suppressing all mail to an address
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            reason: None,
            types: Vec::new(),
        }
    }

    /// Attach a reason
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Restrict the suppression to a message category
    pub fn suppression_type(mut self, suppression_type: SuppressionType) -> Self {
        self.types.push(suppression_type);
        self
    }
}

/// Suppression record returned by the listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SuppressionRecord {
    /// Suppressed address or pattern
    pub address: String,
    /// Note recorded with the entry
    #[serde(default)]
    pub reason: Option<String>,
    /// How the entry was created (api, bounce, complaint)
    #[serde(default)]
    pub source: Option<String>,
    /// Categories the suppression applies to
    #[serde(default)]
    pub types: Vec<SuppressionType>,
    /// When the entry was created
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Options for listing suppression entries
#[derive(Debug, Clone, Default)]
pub struct ListSuppressionsOptions {
    /// Maximum number of entries to return (1 to 1000)
    pub limit: Option<i64>,
    /// Number of entries to skip
    pub offset: Option<i64>,
    /// Restrict to entries matching this recipient
    pub recipient: Option<String>,
    /// Restrict to entries created by this source
    pub source: Option<String>,
}

impl ListSuppressionsOptions {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(recipient) = &self.recipient {
            query.push(("recipient", recipient.clone()));
        }
        if let Some(source) = &self.source {
            query.push(("source", source.clone()));
        }
        query
    }
}

/// Suppression entries on the account
#[derive(Debug, Clone)]
pub struct ListSuppressionsResponse {
    /// Matching entries
    pub entries: Vec<SuppressionRecord>,
}

#[derive(Serialize)]
struct CreatePayload<'a> {
    entries: &'a [SuppressionEntry],
}

/// Suppressions service
#[derive(Clone)]
pub struct SuppressionsService {
    dispatch: Dispatcher,
}

impl SuppressionsService {
    /// Create a new suppressions service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// Add entries to the suppression list
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub async fn create(&self, entries: &[SuppressionEntry]) -> ApiResult<()> {
        if entries.is_empty() {
            return Err(ApiError::validation("No suppression entries provided."));
        }
        if entries.iter().any(|e| e.address.trim().is_empty()) {
            return Err(ApiError::validation(
                "Suppression entries must include an address.",
            ));
        }

        let payload = CreatePayload { entries };
        let result = self
            .dispatch
            .post(SUPPRESSION_PATH, &[], Some(&payload))
            .await;
        unwrap_empty(result, CREATE_ERRORS)
    }

    /// List suppression entries
    #[instrument(skip(self, options))]
    pub async fn list(&self, options: ListSuppressionsOptions) -> ApiResult<ListSuppressionsResponse> {
        if let Some(message) =
            validate_limit(options.limit, 1, 1000).or_else(|| validate_offset(options.offset))
        {
            return Err(ApiError::validation(message));
        }

        let result = self.dispatch.get(SUPPRESSION_PATH, &options.query()).await;
        let entries: Vec<SuppressionRecord> = unwrap_json(result, LIST_ERRORS)?;
        Ok(ListSuppressionsResponse { entries })
    }

    /// Remove a recipient from the suppression list
    #[instrument(skip(self))]
    pub async fn delete(&self, recipient: &str) -> ApiResult<()> {
        if let Some(message) = require(recipient, "No recipient provided.") {
            return Err(ApiError::validation(message));
        }

        let result = self
            .dispatch
            .delete(SUPPRESSION_PATH, &[("recipient", recipient.to_string())])
            .await;
        unwrap_empty(result, DELETE_ERRORS)
    }
}
