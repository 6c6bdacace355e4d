//! Sub-accounts service implementation.

use serde::Serialize;
use tracing::instrument;

use super::{
    ListApiKeysResponse, ListSmtpPasswordsResponse, ListSubAccountsOptions,
    ListSubAccountsResponse, SmtpPassword, SubAccount, SubAccountApiKey,
};
use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_empty, unwrap_json, ApiError, ApiResult, StatusMessages};
use crate::validate::{require, validate_limit, validate_offset};

const SUB_ACCOUNT_PATH: &str = "tx/v1/sub-account";

const HANDLE_MESSAGE: &str =
    "The handle must contain only lowercase letters and numbers, and be between 3 and 128 characters long.";

const CREATE_ERRORS: StatusMessages = &[
    (400, "The handle is not valid."),
    (403, "Forbidden."),
    (409, "A sub-account with this handle already exists."),
];

const LIST_ERRORS: StatusMessages = &[(403, "Forbidden.")];

const COMMON_ERRORS: StatusMessages = &[(403, "Forbidden."), (404, "Sub-account not found.")];

#[derive(Serialize)]
struct CreatePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    handle: Option<&'a str>,
}

/// Handles are lowercase alphanumeric, 3 to 128 characters.
fn validate_handle(handle: &str) -> Option<String> {
    let valid = (3..=128).contains(&handle.len())
        && handle
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
    (!valid).then(|| HANDLE_MESSAGE.to_string())
}

/// Sub-accounts service
#[derive(Clone)]
pub struct SubAccountsService {
    dispatch: Dispatcher,
}

impl SubAccountsService {
    /// Create a new sub-accounts service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// Create a sub-account. When `handle` is omitted the provider
    /// assigns one.
    #[instrument(skip(self))]
    pub async fn create(&self, handle: Option<&str>) -> ApiResult<SubAccount> {
        if let Some(message) = handle.and_then(validate_handle) {
            return Err(ApiError::validation(message));
        }

        let payload = CreatePayload { handle };
        let result = self
            .dispatch
            .post(SUB_ACCOUNT_PATH, &[], Some(&payload))
            .await;
        unwrap_json(result, CREATE_ERRORS)
    }

    /// List sub-accounts
    #[instrument(skip(self, options))]
    pub async fn list(&self, options: ListSubAccountsOptions) -> ApiResult<ListSubAccountsResponse> {
        if let Some(message) =
            validate_limit(options.limit, 1, 1000).or_else(|| validate_offset(options.offset))
        {
            return Err(ApiError::validation(message));
        }

        let result = self.dispatch.get(SUB_ACCOUNT_PATH, &options.query()).await;
        let sub_accounts: Vec<SubAccount> = unwrap_json(result, LIST_ERRORS)?;
        Ok(ListSubAccountsResponse { sub_accounts })
    }

    /// Delete a sub-account
    #[instrument(skip(self))]
    pub async fn delete(&self, handle: &str) -> ApiResult<()> {
        if let Some(message) = require(handle, "No handle provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{SUB_ACCOUNT_PATH}/{handle}");
        let result = self.dispatch.delete(&path, &[]).await;
        unwrap_empty(result, COMMON_ERRORS)
    }

    /// Suspend sending for a sub-account
    #[instrument(skip(self))]
    pub async fn suspend(&self, handle: &str) -> ApiResult<()> {
        self.toggle(handle, "suspend").await
    }

    /// Re-activate sending for a sub-account
    #[instrument(skip(self))]
    pub async fn activate(&self, handle: &str) -> ApiResult<()> {
        self.toggle(handle, "activate").await
    }

    async fn toggle(&self, handle: &str, action: &str) -> ApiResult<()> {
        if let Some(message) = require(handle, "No handle provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{SUB_ACCOUNT_PATH}/{handle}/{action}");
        let result = self.dispatch.post::<()>(&path, &[], None).await;
        unwrap_empty(result, COMMON_ERRORS)
    }

    /// Issue an API key for a sub-account
    #[instrument(skip(self))]
    pub async fn create_api_key(&self, handle: &str) -> ApiResult<SubAccountApiKey> {
        if let Some(message) = require(handle, "No handle provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{SUB_ACCOUNT_PATH}/{handle}/api-key");
        let result = self.dispatch.post::<()>(&path, &[], None).await;
        unwrap_json(result, COMMON_ERRORS)
    }

    /// List the API keys issued to a sub-account
    #[instrument(skip(self))]
    pub async fn list_api_keys(&self, handle: &str) -> ApiResult<ListApiKeysResponse> {
        if let Some(message) = require(handle, "No handle provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{SUB_ACCOUNT_PATH}/{handle}/api-key");
        let result = self.dispatch.get(&path, &[]).await;
        let keys: Vec<SubAccountApiKey> = unwrap_json(result, COMMON_ERRORS)?;
        Ok(ListApiKeysResponse { keys })
    }

    /// Revoke an API key issued to a sub-account
    #[instrument(skip(self))]
    pub async fn delete_api_key(&self, handle: &str, id: i64) -> ApiResult<()> {
        if let Some(message) = require(handle, "No handle provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{SUB_ACCOUNT_PATH}/{handle}/api-key/{id}");
        let result = self.dispatch.delete(&path, &[]).await;
        unwrap_empty(result, COMMON_ERRORS)
    }

    /// Issue an SMTP password for a sub-account
    #[instrument(skip(self))]
    pub async fn create_smtp_password(&self, handle: &str) -> ApiResult<SmtpPassword> {
        if let Some(message) = require(handle, "No handle provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{SUB_ACCOUNT_PATH}/{handle}/smtp-password");
        let result = self.dispatch.post::<()>(&path, &[], None).await;
        unwrap_json(result, COMMON_ERRORS)
    }

    /// List the SMTP passwords issued to a sub-account
    #[instrument(skip(self))]
    pub async fn list_smtp_passwords(&self, handle: &str) -> ApiResult<ListSmtpPasswordsResponse> {
        if let Some(message) = require(handle, "No handle provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{SUB_ACCOUNT_PATH}/{handle}/smtp-password");
        let result = self.dispatch.get(&path, &[]).await;
        let passwords: Vec<SmtpPassword> = unwrap_json(result, COMMON_ERRORS)?;
        Ok(ListSmtpPasswordsResponse { passwords })
    }

    /// Revoke an SMTP password issued to a sub-account
    #[instrument(skip(self))]
    pub async fn delete_smtp_password(&self, handle: &str, id: i64) -> ApiResult<()> {
        if let Some(message) = require(handle, "No handle provided.") {
            return Err(ApiError::validation(message));
        }

        let path = format!("{SUB_ACCOUNT_PATH}/{handle}/smtp-password/{id}");
        let result = self.dispatch.delete(&path, &[]).await;
        unwrap_empty(result, COMMON_ERRORS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_validation() {
        assert_eq!(validate_handle("acme42"), None);
        assert_eq!(validate_handle("abc"), None);
        assert!(validate_handle("ab").is_some());
        assert!(validate_handle("Acme").is_some());
        assert!(validate_handle("acme-42").is_some());
        assert!(validate_handle(&"a".repeat(129)).is_some());
        assert_eq!(validate_handle(&"a".repeat(128)), None);
    }
}
