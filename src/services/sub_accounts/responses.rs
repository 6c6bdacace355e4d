//! Response types for the sub-accounts service.

use serde::Deserialize;

/// A tenant sub-account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubAccount {
    /// Whether the sub-account may send
    pub enabled: bool,
    /// Unique handle
    pub handle: String,
}

/// Sub-accounts on the parent account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSubAccountsResponse {
    /// Sub-accounts, in listing order
    pub sub_accounts: Vec<SubAccount>,
}

/// API key issued to a sub-account
#[derive(Debug, Clone, Deserialize)]
pub struct SubAccountApiKey {
    /// Key identifier, used for revocation
    pub id: i64,
    /// The key value; only returned at creation time
    pub key: String,
}

/// API keys issued to a sub-account
#[derive(Debug, Clone)]
pub struct ListApiKeysResponse {
    /// Issued keys
    pub keys: Vec<SubAccountApiKey>,
}

/// SMTP password issued to a sub-account
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpPassword {
    /// Whether the password is usable
    pub enabled: bool,
    /// Password identifier, used for revocation
    pub id: i64,
    /// The password value
    pub smtp_password: String,
}

/// SMTP passwords issued to a sub-account
#[derive(Debug, Clone)]
pub struct ListSmtpPasswordsResponse {
    /// Issued passwords
    pub passwords: Vec<SmtpPassword>,
}
