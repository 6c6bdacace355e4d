//! Sub-accounts service for managing tenant accounts and their
//! credentials.

mod requests;
mod responses;
mod service;

pub use requests::ListSubAccountsOptions;
pub use responses::{
    ListApiKeysResponse, ListSmtpPasswordsResponse, ListSubAccountsResponse, SmtpPassword,
    SubAccount, SubAccountApiKey,
};
pub use service::SubAccountsService;
