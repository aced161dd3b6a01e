//! Authenticated HTTP access to the remote payment ledger API: request
//! execution with rate-limit backoff, cursor pagination, the refresh-scoped
//! object cache, and the credential/2FA token exchange.

mod auth;
mod cache;
mod client;
mod error;
mod pager;
mod resolve;

pub use auth::{AuthClient, AuthOutcome};
pub use cache::{ObjectCache, ResourceKind};
pub use client::{ApiClient, API_VERSION, VERSION_HEADER};
pub use error::{ApiError, ApiResult, AuthFailure};
pub use pager::Pager;
pub use resolve::resolve;
