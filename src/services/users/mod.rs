//! Inbound recipient users and their per-user filtering lists.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::lists::ListEntriesResponse;
use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_empty, unwrap_json, ApiError, ApiResult, StatusMessages};
use crate::types::{ListEntry, ListName};
use crate::validate::require;

const USERS_PATH: &str = "inbound/v1/users";

const CREATE_ERRORS: StatusMessages = &[
    (400, "The email address is not valid."),
    (403, "Forbidden."),
    (409, "The user already exists."),
];

const LIST_ENTRY_ERRORS: StatusMessages = &[
    (400, "The list entry is not valid."),
    (403, "Forbidden."),
    (404, "User not found."),
];

/// Options for creating a recipient user
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateUserOptions {
    /// Grant domain-admin rights
    pub admin: bool,
    /// Enable spam filtering for this recipient
    pub filter: Option<bool>,
}

/// A recipient user on an inbound domain
#[derive(Debug, Clone, Deserialize)]
pub struct InboundUser {
    /// The recipient address
    pub email_address: String,
    /// Roles granted to the user
    #[serde(default)]
    pub roles: Vec<String>,
    /// Whether filtering is enabled
    #[serde(default)]
    pub filter: Option<bool>,
}

#[derive(Serialize)]
struct CreatePayload {
    admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<bool>,
}

#[derive(Serialize)]
struct EntryPayload<'a> {
    list_name: ListName,
    item: &'a str,
}

/// Users service
#[derive(Clone)]
pub struct UsersService {
    dispatch: Dispatcher,
}

impl UsersService {
    /// Create a new users service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// Create a recipient user
    #[instrument(skip(self, options))]
    pub async fn create(
        &self,
        email_address: &str,
        options: CreateUserOptions,
    ) -> ApiResult<InboundUser> {
        if let Some(message) = require(email_address, "No email address provided.") {
            return Err(ApiError::validation(message));
        }

        let payload = CreatePayload {
            admin: options.admin,
            filter: options.filter,
        };
        let result = self
            .dispatch
            .post(
                USERS_PATH,
                &[("email_address", email_address.to_string())],
                Some(&payload),
            )
            .await;
        unwrap_json(result, CREATE_ERRORS)
    }

    /// Add an entry to one of a user's filtering lists
    #[instrument(skip(self))]
    pub async fn add_list_entry(
        &self,
        email_address: &str,
        list_name: ListName,
        item: &str,
    ) -> ApiResult<ListEntry> {
        if let Some(message) = require(email_address, "No email address provided.")
            .or_else(|| require(item, "No item provided."))
        {
            return Err(ApiError::validation(message));
        }

        let path = format!("{USERS_PATH}/{email_address}/lists");
        let payload = EntryPayload { list_name, item };
        let result = self.dispatch.post(&path, &[], Some(&payload)).await;
        unwrap_json(result, LIST_ENTRY_ERRORS)
    }

    /// List the entries in one of a user's filtering lists
    #[instrument(skip(self))]
    pub async fn list_entries(
        &self,
        email_address: &str,
        list_name: ListName,
    ) -> ApiResult<ListEntriesResponse> {
        if let Some(message) = require(email_address, "No email address provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{USERS_PATH}/{email_address}/lists/{list_name}");
        let result = self.dispatch.get(&path, &[]).await;
        let entries: Vec<ListEntry> = unwrap_json(result, LIST_ENTRY_ERRORS)?;
        Ok(ListEntriesResponse { entries })
    }

    /// Remove an entry from one of a user's filtering lists
    #[instrument(skip(self))]
    pub async fn delete_list_entry(
        &self,
        email_address: &str,
        list_name: ListName,
        item: &str,
    ) -> ApiResult<()> {
        if let Some(message) = require(email_address, "No email address provided.")
            .or_else(|| require(item, "No item provided."))
        {
            return Err(ApiError::validation(message));
        }

        let path = format!("{USERS_PATH}/{email_address}/lists/{list_name}");
        let result = self
            .dispatch
            .delete(&path, &[("item", item.to_string())])
            .await;
        unwrap_empty(result, LIST_ENTRY_ERRORS)
    }
}
