use chrono::{DateTime, Utc};
use paysync_client::{ApiClient, ObjectCache, Pager, ResourceKind};
use paysync_core::{
    dates, Balance, BalanceLine, Creditor, LedgerAccount, Locale, Payment, Payout, Refund,
    Transaction,
};
use tracing::info;

use crate::balances;
use crate::context::{iso8601, SyncContext};
use crate::error::SyncResult;
use crate::reversals;
use crate::synthesize;

/// Everything one refresh produces for the host application.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub balances: Vec<BalanceLine>,
    pub transactions: Vec<Transaction>,
}

/// Run one full refresh for a creditor: balances, the three primary
/// collections, then the reversal passes, merged into one output list. The
/// context (and with it the object cache) lives exactly as long as this
/// call.
pub async fn refresh(
    client: &ApiClient,
    creditor: &str,
    since: DateTime<Utc>,
    locale: Locale,
) -> SyncResult<RefreshOutcome> {
    let ctx = SyncContext::new(client, creditor, since, locale);
    info!(creditor, since = %since, "starting ledger refresh");

    let mut collected = Vec::new();
    let mut balances_pager = ctx.pager::<Balance>(
        ResourceKind::Balances,
        vec![("creditor".to_string(), creditor.to_string())],
    );
    while let Some(balance) = balances_pager.next().await? {
        collected.push(balance);
    }
    let balances = balances::aggregate(&collected);

    let mut transactions = Vec::new();

    let mut payments = ctx.pager::<Payment>(
        ResourceKind::Payments,
        vec![
            ("creditor".to_string(), creditor.to_string()),
            (
                "charge_date[gte]".to_string(),
                dates::local_date(since).to_string(),
            ),
        ],
    );
    while let Some(payment) = payments.next().await? {
        if let Some(transaction) = synthesize::payment_transaction(&ctx, &payment).await? {
            transactions.push(transaction);
        }
    }

    let mut refunds = ctx.pager::<Refund>(
        ResourceKind::Refunds,
        vec![
            ("creditor".to_string(), creditor.to_string()),
            ("created_at[gte]".to_string(), iso8601(since)),
        ],
    );
    while let Some(refund) = refunds.next().await? {
        transactions.push(synthesize::refund_transaction(&ctx, &refund).await?);
    }

    let mut payouts = ctx.pager::<Payout>(
        ResourceKind::Payouts,
        vec![
            ("creditor".to_string(), creditor.to_string()),
            ("created_at[gte]".to_string(), iso8601(since)),
        ],
    );
    while let Some(payout) = payouts.next().await? {
        transactions.extend(synthesize::payout_transactions(&ctx, &payout).await?);
    }

    transactions.extend(reversals::reconcile(&ctx).await?);

    info!(
        balances = balances.len(),
        transactions = transactions.len(),
        "ledger refresh complete"
    );
    Ok(RefreshOutcome {
        balances,
        transactions,
    })
}

/// Map the creditors collection to the host application's account listing.
pub async fn list_accounts(client: &ApiClient) -> SyncResult<Vec<LedgerAccount>> {
    let cache = ObjectCache::new();
    let mut pager = Pager::<Creditor>::new(client, &cache, ResourceKind::Creditors, Vec::new());
    let mut accounts = Vec::new();
    while let Some(creditor) = pager.next().await? {
        accounts.push(LedgerAccount {
            id: creditor.id,
            name: creditor.name,
            currency: creditor.payout_currency,
        });
    }
    Ok(accounts)
}
