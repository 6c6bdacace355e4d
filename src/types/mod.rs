//! Shared types used across resource modules.

use serde::{Deserialize, Serialize};

/// Email address with an optional display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Address in `user@domain` form
    pub email: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    /// Create an address without a display name
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Create an address with a display name
    pub fn with_name(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

impl From<&str> for EmailAddress {
    fn from(email: &str) -> Self {
        Self::new(email)
    }
}

impl From<String> for EmailAddress {
    fn from(email: String) -> Self {
        Self::new(email)
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

/// Recipient filtering lists available on the inbound service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    /// Reject mail from matching senders
    Blocklist,
    /// Always accept mail from matching senders
    Safelist,
    /// Alias of the blocklist kept for backwards compatibility
    Blacklist,
    /// Alias of the safelist kept for backwards compatibility
    Whitelist,
}

impl ListName {
    /// Path segment for this list
    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Blocklist => "blocklist",
            ListName::Safelist => "safelist",
            ListName::Blacklist => "blacklist",
            ListName::Whitelist => "whitelist",
        }
    }
}

impl std::fmt::Display for ListName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of item held in a filtering list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListItemType {
    /// A whole sending domain
    Domain,
    /// A single address
    EmailAddress,
    /// A sending IP address
    IpAddress,
}

/// Entry in a recipient filtering list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    /// The list the entry belongs to
    pub action: ListName,
    /// The matched item
    pub item: String,
    /// What kind of item was matched
    pub item_type: ListItemType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_display() {
        assert_eq!(EmailAddress::new("a@x.com").to_string(), "a@x.com");
        assert_eq!(
            EmailAddress::with_name("a@x.com", "Alice").to_string(),
            "Alice <a@x.com>"
        );
    }

    #[test]
    fn test_email_address_serializes_without_empty_name() {
        let json = serde_json::to_string(&EmailAddress::new("a@x.com")).unwrap();
        assert_eq!(json, r#"{"email":"a@x.com"}"#);
    }

    #[test]
    fn test_list_entry_wire_format() {
        let entry: ListEntry = serde_json::from_str(
            r#"{"action":"blocklist","item":"spam.example","item_type":"domain"}"#,
        )
        .unwrap();
        assert_eq!(entry.action, ListName::Blocklist);
        assert_eq!(entry.item_type, ListItemType::Domain);
    }
}
