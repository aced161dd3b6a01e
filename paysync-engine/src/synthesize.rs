//! Maps a single payment, refund, or payout plus its resolved relations
//! into ledger transactions.

use paysync_client::ResourceKind;
use paysync_core::{
    dates, major_units, scheme_label, BankAccount, Locale, Payment, PaymentStatus, Payout, Refund,
    Transaction,
};

use crate::context::SyncContext;
use crate::error::SyncResult;

/// Shape one ledger transaction from a primary payment scan entry.
/// Cancelled and approval-denied payments never reach the ledger.
pub async fn payment_transaction(
    ctx: &SyncContext<'_>,
    payment: &Payment,
) -> SyncResult<Option<Transaction>> {
    if matches!(
        payment.status,
        PaymentStatus::Cancelled | PaymentStatus::CustomerApprovalDenied
    ) {
        return Ok(None);
    }
    let mandate = ctx.mandate_for_payment(payment).await?;
    let account = ctx.customer_account(&mandate).await?;
    let (name, number) = counterparty(ctx.locale, account.as_ref());
    Ok(Some(Transaction {
        amount: major_units(payment.amount),
        booked: payment.status.is_booked(),
        // the ledger books on the charge date, not on creation
        booking_date: payment.charge_date,
        value_date: None,
        currency: payment.currency.clone(),
        counterpart_name: Some(name),
        counterpart_account: number,
        reference: payment.id.clone(),
        booking_text: scheme_label(&mandate.scheme).to_string(),
        purpose: payment.description.clone(),
    }))
}

/// Refunds debit the ledger; the reference carries the originating payment
/// id when it can be resolved.
pub async fn refund_transaction(ctx: &SyncContext<'_>, refund: &Refund) -> SyncResult<Transaction> {
    let (mandate, origin) = ctx.mandate_for_refund(refund).await?;
    let account = ctx.customer_account(&mandate).await?;
    let (name, number) = counterparty(ctx.locale, account.as_ref());
    let reference = match &origin {
        Some(payment) => format!("{} ({})", refund.id, payment.id),
        None => refund.id.clone(),
    };
    Ok(Transaction {
        amount: -major_units(refund.amount),
        booked: refund.status.is_booked(),
        booking_date: dates::local_date(refund.created_at),
        value_date: None,
        currency: refund.currency.clone(),
        counterpart_name: Some(name),
        counterpart_account: number,
        reference,
        booking_text: ctx.locale.refund().to_string(),
        purpose: origin
            .as_ref()
            .and_then(|payment| payment.description.clone())
            .or_else(|| refund.reference.clone()),
    })
}

/// Payouts debit the ledger and may carry a second synthetic line for the
/// withheld fees, which the remote ledger never exposes as a resource of
/// its own.
pub async fn payout_transactions(
    ctx: &SyncContext<'_>,
    payout: &Payout,
) -> SyncResult<Vec<Transaction>> {
    let account = match payout.links.creditor_bank_account.as_deref() {
        Some(id) => Some(
            ctx.resolve::<BankAccount>(ResourceKind::CreditorBankAccounts, id)
                .await?,
        ),
        None => None,
    };
    let booked = payout.status.is_booked();
    let booking_date = dates::local_date(payout.created_at);
    let mut lines = vec![Transaction {
        amount: -major_units(payout.amount),
        booked,
        booking_date,
        value_date: payout.arrival_date,
        currency: payout.currency.clone(),
        counterpart_name: account
            .as_ref()
            .and_then(|account| account.account_holder_name.clone()),
        counterpart_account: account.as_ref().and_then(masked_number),
        reference: payout.id.clone(),
        booking_text: ctx.locale.payout().to_string(),
        purpose: payout.reference.clone(),
    }];
    if payout.deducted_fees != 0 {
        lines.push(Transaction {
            amount: -major_units(payout.deducted_fees),
            booked,
            booking_date,
            value_date: payout.arrival_date,
            currency: payout.currency.clone(),
            counterpart_name: None,
            counterpart_account: None,
            reference: payout.id.clone(),
            booking_text: ctx.locale.payout_fees().to_string(),
            purpose: None,
        });
    }
    Ok(lines)
}

/// Counterparty display fields for a possibly-unresolvable bank account.
pub(crate) fn counterparty(
    locale: Locale,
    account: Option<&BankAccount>,
) -> (String, Option<String>) {
    match account {
        Some(account) => {
            let name = account
                .account_holder_name
                .clone()
                .or_else(|| account.bank_name.clone())
                .unwrap_or_else(|| locale.removed_customer().to_string());
            (name, masked_number(account))
        }
        None => (locale.removed_customer().to_string(), None),
    }
}

fn masked_number(account: &BankAccount) -> Option<String> {
    account
        .account_number_ending
        .as_ref()
        .map(|ending| format!("****{ending}"))
}
