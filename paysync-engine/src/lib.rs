//! Ledger synthesis: merges the remote API's independently paginated event
//! streams into per-currency balances and one consistent, signed,
//! booked-vs-pending transaction list.

pub mod balances;
mod context;
mod error;
mod refresh;
pub mod reversals;
pub mod synthesize;

pub use context::SyncContext;
pub use error::{SyncError, SyncResult};
pub use refresh::{list_accounts, refresh, RefreshOutcome};
