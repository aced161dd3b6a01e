use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Merchant account whose ledger is being synthesized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Creditor {
    pub id: String,
    pub name: String,
    pub payout_currency: Option<String>,
}

/// Authorization linking a payer's bank account to a creditor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mandate {
    pub id: String,
    pub scheme: String,
    pub reference: Option<String>,
    #[serde(default)]
    pub links: MandateLinks,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MandateLinks {
    pub customer_bank_account: Option<String>,
    pub creditor: Option<String>,
}

/// Bank account details, customer or creditor side. The remote party may
/// purge personal data, in which case the account is unresolvable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub account_number_ending: Option<String>,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub charge_date: NaiveDate,
    pub description: Option<String>,
    pub reference: Option<String>,
    #[serde(default)]
    pub links: PaymentLinks,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PaymentLinks {
    pub mandate: Option<String>,
    pub creditor: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    PendingCustomerApproval,
    PendingSubmission,
    Submitted,
    Confirmed,
    PaidOut,
    Cancelled,
    CustomerApprovalDenied,
    Failed,
    ChargedBack,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Refund {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: RefundStatus,
    pub created_at: DateTime<Utc>,
    pub reference: Option<String>,
    #[serde(default)]
    pub links: RefundLinks,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RefundLinks {
    pub payment: Option<String>,
    pub mandate: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Created,
    PendingSubmission,
    Submitted,
    Paid,
    Bounced,
    FundsReturned,
    Failed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Payout {
    pub id: String,
    pub amount: i64,
    /// Fees withheld from the payout, reported only as this sub-field.
    #[serde(default)]
    pub deducted_fees: i64,
    pub currency: String,
    pub status: PayoutStatus,
    pub created_at: DateTime<Utc>,
    pub arrival_date: Option<NaiveDate>,
    pub reference: Option<String>,
    #[serde(default)]
    pub links: PayoutLinks,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PayoutLinks {
    pub creditor_bank_account: Option<String>,
    pub creditor: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Paid,
    Bounced,
}

/// Immutable record of a state transition on a payment or refund.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub action: String,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub details: EventDetails,
    #[serde(default)]
    pub links: EventLinks,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventDetails {
    pub origin: Option<String>,
    pub cause: Option<String>,
    pub description: Option<String>,
    pub reason_code: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLinks {
    pub payment: Option<String>,
    pub refund: Option<String>,
    pub mandate: Option<String>,
    pub parent_event: Option<String>,
}

/// Per-currency balance snapshot. The type vocabulary is open on the remote
/// side, so it stays a plain string and unknown values are skipped upstream.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Balance {
    pub balance_type: String,
    pub amount: i64,
    pub currency: String,
}
