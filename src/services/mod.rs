//! Resource services for the MailChannels API.
//!
//! Each service holds a [`Dispatcher`](crate::dispatch::Dispatcher)
//! handle and exposes one method per provider endpoint, following the
//! same validate → dispatch → reshape pattern throughout.

pub mod domains;
pub mod emails;
pub mod lists;
pub mod metrics;
pub mod service;
pub mod sub_accounts;
pub mod suppressions;
pub mod users;

pub use domains::DomainsService;
pub use emails::EmailsService;
pub use lists::ListsService;
pub use metrics::MetricsService;
pub use service::ServiceService;
pub use sub_accounts::SubAccountsService;
pub use suppressions::SuppressionsService;
pub use users::UsersService;
