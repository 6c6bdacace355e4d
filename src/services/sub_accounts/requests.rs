//! Request types for the sub-accounts service.

/// Options for listing sub-accounts
#[derive(Debug, Clone, Default)]
pub struct ListSubAccountsOptions {
    /// Maximum number of sub-accounts to return (1 to 1000)
    pub limit: Option<i64>,
    /// Number of sub-accounts to skip
    pub offset: Option<i64>,
}

impl ListSubAccountsOptions {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        query
    }
}
