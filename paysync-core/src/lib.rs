//! Domain model shared by the paysync crates.

mod booking;
pub mod dates;
mod locale;
mod money;
mod resources;
mod scheme;
mod transaction;

pub use dates::DateParseError;
pub use locale::Locale;
pub use money::major_units;
pub use resources::{
    Balance, BankAccount, Creditor, Event, EventDetails, EventLinks, Mandate, MandateLinks,
    Payment, PaymentLinks, PaymentStatus, Payout, PayoutLinks, PayoutStatus, Refund, RefundLinks,
    RefundStatus,
};
pub use scheme::scheme_label;
pub use transaction::{BalanceLine, LedgerAccount, Transaction};
