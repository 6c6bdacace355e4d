//! Account-level recipient filtering lists.

use serde::Serialize;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_empty, unwrap_json, ApiError, ApiResult, StatusMessages};
use crate::types::{ListEntry, ListName};
use crate::validate::require;

const LISTS_PATH: &str = "inbound/v1/lists";

const LIST_ERRORS: StatusMessages = &[
    (400, "The list entry is not valid."),
    (403, "Forbidden."),
];

/// Entries held in a filtering list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntriesResponse {
    /// Entries, in listing order
    pub entries: Vec<ListEntry>,
}

#[derive(Serialize)]
struct EntryPayload<'a> {
    item: &'a str,
}

/// Lists service
#[derive(Clone)]
pub struct ListsService {
    dispatch: Dispatcher,
}

impl ListsService {
    /// Create a new lists service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// Add an item to an account-level list
    #[instrument(skip(self))]
    pub async fn add_entry(&self, list_name: ListName, item: &str) -> ApiResult<ListEntry> {
        if let Some(message) = require(item, "No item provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{LISTS_PATH}/{list_name}");
        let payload = EntryPayload { item };
        let result = self.dispatch.post(&path, &[], Some(&payload)).await;
        unwrap_json(result, LIST_ERRORS)
    }

    /// List the entries in an account-level list
    #[instrument(skip(self))]
    pub async fn entries(&self, list_name: ListName) -> ApiResult<ListEntriesResponse> {
        let path = format!("{LISTS_PATH}/{list_name}");
        let result = self.dispatch.get(&path, &[]).await;
        let entries: Vec<ListEntry> = unwrap_json(result, LIST_ERRORS)?;
        Ok(ListEntriesResponse { entries })
    }

    /// Remove an item from an account-level list
    #[instrument(skip(self))]
    pub async fn delete_entry(&self, list_name: ListName, item: &str) -> ApiResult<()> {
        if let Some(message) = require(item, "No item provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{LISTS_PATH}/{list_name}");
        let result = self
            .dispatch
            .delete(&path, &[("item", item.to_string())])
            .await;
        unwrap_empty(result, LIST_ERRORS)
    }
}
