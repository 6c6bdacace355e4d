//! Request types for the emails service.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::types::EmailAddress;

/// Request to send a transactional email.
///
/// The ergonomic shape here is flattened; [`SendEmailRequest::to_payload`]
/// restructures it into the provider's `personalizations`/`content`
/// arrays at dispatch time. Mustache substitution of `template_data`
/// happens on the provider side.
#[derive(Debug, Clone, Default)]
pub struct SendEmailRequest {
    /// Sender address
    pub from: Option<EmailAddress>,
    /// Primary recipients
    pub to: Vec<EmailAddress>,
    /// Carbon-copy recipients
    pub cc: Vec<EmailAddress>,
    /// Blind carbon-copy recipients
    pub bcc: Vec<EmailAddress>,
    /// Reply-to address
    pub reply_to: Option<EmailAddress>,
    /// Message subject
    pub subject: String,
    /// HTML body
    pub html: Option<String>,
    /// Plain-text body
    pub text: Option<String>,
    /// File attachments
    pub attachments: Vec<Attachment>,
    /// Additional message headers
    pub headers: HashMap<String, String>,
    /// Mustache template data, substituted by the provider
    pub template_data: Option<Value>,
    /// Click/open tracking toggles
    pub tracking: Option<TrackingSettings>,
    /// Campaign identifier for metrics grouping
    pub campaign_id: Option<String>,
    /// Validate the message without delivering it
    pub dry_run: bool,
}

impl SendEmailRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender
    pub fn from(mut self, from: impl Into<EmailAddress>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Add a primary recipient
    pub fn to(mut self, to: impl Into<EmailAddress>) -> Self {
        self.to.push(to.into());
        self
    }

    /// Add a carbon-copy recipient
    pub fn cc(mut self, cc: impl Into<EmailAddress>) -> Self {
        self.cc.push(cc.into());
        self
    }

    /// Add a blind carbon-copy recipient
    pub fn bcc(mut self, bcc: impl Into<EmailAddress>) -> Self {
        self.bcc.push(bcc.into());
        self
    }

    /// Set the reply-to address
    pub fn reply_to(mut self, reply_to: impl Into<EmailAddress>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Set the subject
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the HTML body
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the plain-text body
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an attachment
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Add a message header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set Mustache template data
    pub fn template_data(mut self, data: Value) -> Self {
        self.template_data = Some(data);
        self
    }

    /// Set tracking toggles
    pub fn tracking(mut self, tracking: TrackingSettings) -> Self {
        self.tracking = Some(tracking);
        self
    }

    /// Set the campaign identifier
    pub fn campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    /// Validate without delivering
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Restructure into the provider wire shape.
    pub(crate) fn to_payload(&self) -> EmailPayload {
        let template_type = self.template_data.as_ref().map(|_| "mustache");

        let mut content = Vec::new();
        if let Some(text) = &self.text {
            content.push(ContentPart {
                content_type: "text/plain",
                value: text.clone(),
                template_type,
            });
        }
        if let Some(html) = &self.html {
            content.push(ContentPart {
                content_type: "text/html",
                value: html.clone(),
                template_type,
            });
        }

        EmailPayload {
            attachments: self.attachments.clone(),
            content,
            from: self.from.clone(),
            headers: self.headers.clone(),
            personalizations: vec![Personalization {
                to: self.to.clone(),
                cc: self.cc.clone(),
                bcc: self.bcc.clone(),
                dynamic_template_data: self.template_data.clone(),
            }],
            reply_to: self.reply_to.clone(),
            subject: self.subject.clone(),
            campaign_id: self.campaign_id.clone(),
            tracking_settings: self.tracking.as_ref().map(TrackingPayload::from),
        }
    }
}

/// File attachment, content base64-encoded
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    /// Base64-encoded file content
    pub content: String,
    /// File name shown to the recipient
    pub filename: String,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Click/open tracking toggles
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingSettings {
    /// Rewrite links for click tracking
    pub click_tracking: Option<bool>,
    /// Embed an open-tracking pixel
    pub open_tracking: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailPayload {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    pub content: Vec<ContentPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<EmailAddress>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    pub personalizations: Vec<Personalization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_settings: Option<TrackingPayload>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Personalization {
    pub to: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_template_data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentPart {
    #[serde(rename = "type")]
    pub content_type: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_type: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TrackingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_tracking: Option<TrackingFlag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_tracking: Option<TrackingFlag>,
}

impl From<&TrackingSettings> for TrackingPayload {
    fn from(settings: &TrackingSettings) -> Self {
        Self {
            click_tracking: settings.click_tracking.map(|enable| TrackingFlag { enable }),
            open_tracking: settings.open_tracking.map(|enable| TrackingFlag { enable }),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TrackingFlag {
    pub enable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_restructuring() {
        let request = SendEmailRequest::new()
            .from(EmailAddress::with_name("a@x.com", "Alice"))
            .to("b@x.com")
            .cc("c@x.com")
            .subject("s")
            .text("plain")
            .html("<p>hi</p>");

        let payload = serde_json::to_value(request.to_payload()).unwrap();

        assert_eq!(payload["subject"], "s");
        assert_eq!(payload["from"]["email"], "a@x.com");
        assert_eq!(payload["personalizations"][0]["to"][0]["email"], "b@x.com");
        assert_eq!(payload["personalizations"][0]["cc"][0]["email"], "c@x.com");
        assert_eq!(payload["content"][0]["type"], "text/plain");
        assert_eq!(payload["content"][1]["type"], "text/html");
        // No template data: content parts carry no template_type
        assert!(payload["content"][0].get("template_type").is_none());
        assert!(payload.get("attachments").is_none());
    }

    #[test]
    fn test_template_data_marks_mustache_content() {
        let request = SendEmailRequest::new()
            .from("a@x.com")
            .to("b@x.com")
            .subject("Order {{order_id}}")
            .html("<p>Hello {{name}}</p>")
            .template_data(json!({"name": "Alice", "order_id": 7}));

        let payload = serde_json::to_value(request.to_payload()).unwrap();

        assert_eq!(payload["content"][0]["template_type"], "mustache");
        assert_eq!(
            payload["personalizations"][0]["dynamic_template_data"]["name"],
            "Alice"
        );
    }

    #[test]
    fn test_tracking_settings_nesting() {
        let request = SendEmailRequest::new().tracking(TrackingSettings {
            click_tracking: Some(true),
            open_tracking: None,
        });

        let payload = serde_json::to_value(request.to_payload()).unwrap();
        assert_eq!(payload["tracking_settings"]["click_tracking"]["enable"], true);
        assert!(payload["tracking_settings"].get("open_tracking").is_none());
    }
}
