use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Synthesized ledger transaction, ready for import into the host
/// accounting application. Amounts are signed major units.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Decimal,
    pub booked: bool,
    pub booking_date: NaiveDate,
    pub value_date: Option<NaiveDate>,
    pub currency: String,
    pub counterpart_name: Option<String>,
    pub counterpart_account: Option<String>,
    pub reference: String,
    pub booking_text: String,
    pub purpose: Option<String>,
}

/// One rendered balance line. Confirmed funds keep one line per remote
/// balance entry; pending amounts are netted into a single line per currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceLine {
    pub currency: String,
    pub amount: Decimal,
    pub pending: bool,
}

/// Account entry exposed to the host application's account listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerAccount {
    pub id: String,
    pub name: String,
    pub currency: Option<String>,
}
