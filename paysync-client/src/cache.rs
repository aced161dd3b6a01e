use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;

/// Collections exposed by the remote API.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Creditors,
    Mandates,
    CustomerBankAccounts,
    CreditorBankAccounts,
    Payments,
    Refunds,
    Payouts,
    Events,
    Balances,
}

impl ResourceKind {
    /// Path segment and JSON envelope key for the collection.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Creditors => "creditors",
            ResourceKind::Mandates => "mandates",
            ResourceKind::CustomerBankAccounts => "customer_bank_accounts",
            ResourceKind::CreditorBankAccounts => "creditor_bank_accounts",
            ResourceKind::Payments => "payments",
            ResourceKind::Refunds => "refunds",
            ResourceKind::Payouts => "payouts",
            ResourceKind::Events => "events",
            ResourceKind::Balances => "balances",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "creditors" => Some(ResourceKind::Creditors),
            "mandates" => Some(ResourceKind::Mandates),
            "customer_bank_accounts" => Some(ResourceKind::CustomerBankAccounts),
            "creditor_bank_accounts" => Some(ResourceKind::CreditorBankAccounts),
            "payments" => Some(ResourceKind::Payments),
            "refunds" => Some(ResourceKind::Refunds),
            "payouts" => Some(ResourceKind::Payouts),
            "events" => Some(ResourceKind::Events),
            "balances" => Some(ResourceKind::Balances),
            _ => None,
        }
    }
}

/// Keyed store for individual API resources, populated by direct fetches and
/// by side-loaded pagination payloads. Scoped to one refresh: entries are
/// inserted at most once per `(kind, id)` and never revalidated mid-run.
#[derive(Debug, Default)]
pub struct ObjectCache {
    entries: Mutex<HashMap<(ResourceKind, String), Value>>,
}

impl ObjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object unless the key is already present. The first copy of
    /// a resource seen during a refresh wins.
    pub fn insert(&self, kind: ResourceKind, id: &str, value: Value) {
        self.entries
            .lock()
            .entry((kind, id.to_string()))
            .or_insert(value);
    }

    pub fn get(&self, kind: ResourceKind, id: &str) -> Option<Value> {
        self.entries.lock().get(&(kind, id.to_string())).cloned()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
