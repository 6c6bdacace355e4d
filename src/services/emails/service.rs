//! Emails service implementation.

use tracing::instrument;

use super::{SendEmailRequest, SendEmailResponse};
use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_json, ApiError, ApiResult, StatusMessages};
use crate::validate::require;

const SEND_PATH: &str = "tx/v1/send";

const SEND_ERRORS: StatusMessages = &[
    (400, "The message payload was rejected."),
    (403, "Forbidden."),
    (413, "The message is too large."),
    (500, "Internal server error."),
];

/// Emails service
#[derive(Clone)]
pub struct EmailsService {
    dispatch: Dispatcher,
}

impl EmailsService {
    /// Create a new emails service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// Send a transactional email
    #[instrument(skip(self, request), fields(recipients = request.to.len()))]
    pub async fn send(&self, request: SendEmailRequest) -> ApiResult<SendEmailResponse> {
        let sender = request.from.as_ref().map(|a| a.email.as_str()).unwrap_or("");
        let no_recipients =
            request.to.is_empty() && request.cc.is_empty() && request.bcc.is_empty();
        let no_content = request.html.is_none() && request.text.is_none();

        if let Some(message) = require(sender, "No sender provided.")
            .or_else(|| no_recipients.then(|| "No recipients provided.".to_string()))
            .or_else(|| require(&request.subject, "No subject provided."))
            .or_else(|| no_content.then(|| "No content provided.".to_string()))
        {
            return Err(ApiError::validation(message));
        }

        let mut query = Vec::new();
        if request.dry_run {
            query.push(("dry-run", "true".to_string()));
        }

        let payload = request.to_payload();
        let result = self.dispatch.post(SEND_PATH, &query, Some(&payload)).await;
        unwrap_json(result, SEND_ERRORS)
    }
}
