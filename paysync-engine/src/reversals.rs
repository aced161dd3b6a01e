//! Ordered reconciliation of the five reversal event streams. The remote
//! API cannot filter events by creditor, so foreign events are dropped here
//! after resolving the affected resource's mandate.

use std::collections::BTreeMap;

use paysync_client::ResourceKind;
use paysync_core::{
    dates, major_units, scheme_label, Event, EventDetails, Mandate, Payment, PaymentStatus, Refund,
    Transaction,
};
use tracing::debug;

use crate::context::{iso8601, SyncContext};
use crate::error::{SyncError, SyncResult};
use crate::synthesize::counterparty;

const CHARGED_BACK: &str = "charged_back";
const CHARGEBACK_SETTLED: &str = "chargeback_settled";
const FAILED: &str = "failed";
const FUNDS_RETURNED: &str = "funds_returned";

/// Run the five event queries in their fixed order and produce the reversal
/// adjustments. Failed-payment events are cumulative; everything else is
/// keyed by the affected resource id, so a later pass replaces an earlier
/// entry for the same resource. The keyed entries drain in id order.
pub async fn reconcile(ctx: &SyncContext<'_>) -> SyncResult<Vec<Transaction>> {
    let mut output = Vec::new();
    let mut adjustments: BTreeMap<String, Transaction> = BTreeMap::new();

    payment_failures(ctx, &mut output).await?;
    chargebacks(ctx, CHARGED_BACK, &mut adjustments).await?;
    chargebacks(ctx, CHARGEBACK_SETTLED, &mut adjustments).await?;
    refund_reversals(ctx, FAILED, &mut adjustments).await?;
    refund_reversals(ctx, FUNDS_RETURNED, &mut adjustments).await?;

    output.extend(adjustments.into_values());
    Ok(output)
}

fn event_params(
    ctx: &SyncContext<'_>,
    resource_type: &str,
    action: &str,
    include: &str,
) -> Vec<(String, String)> {
    vec![
        ("resource_type".to_string(), resource_type.to_string()),
        ("action".to_string(), action.to_string()),
        ("created_at[gte]".to_string(), iso8601(ctx.since)),
        ("include".to_string(), include.to_string()),
    ]
}

/// Every failure event books its own negative transaction. Retries of the
/// same payment are deliberately not merged: the API does not expose the
/// retry chain, so one record per failure is the honest rendering.
async fn payment_failures(ctx: &SyncContext<'_>, output: &mut Vec<Transaction>) -> SyncResult<()> {
    let mut pager =
        ctx.pager::<Event>(ResourceKind::Events, event_params(ctx, "payments", FAILED, "payment"));
    while let Some(event) = pager.next().await? {
        let Some((payment, mandate)) = affected_payment(ctx, &event).await? else {
            continue;
        };
        let account = ctx.customer_account(&mandate).await?;
        let (name, number) = counterparty(ctx.locale, account.as_ref());
        output.push(Transaction {
            amount: -major_units(payment.amount),
            booked: true,
            booking_date: dates::local_date(event.created_at),
            value_date: None,
            currency: payment.currency.clone(),
            counterpart_name: Some(name),
            counterpart_account: number,
            reference: payment.id.clone(),
            booking_text: format!("{}: {}", ctx.locale.failed(), scheme_label(&mandate.scheme)),
            purpose: details_purpose(&event.details),
        });
    }
    Ok(())
}

async fn chargebacks(
    ctx: &SyncContext<'_>,
    action: &str,
    adjustments: &mut BTreeMap<String, Transaction>,
) -> SyncResult<()> {
    let mut pager =
        ctx.pager::<Event>(ResourceKind::Events, event_params(ctx, "payments", action, "payment"));
    while let Some(event) = pager.next().await? {
        let Some((payment, mandate)) = affected_payment(ctx, &event).await? else {
            continue;
        };
        // A payment back at confirmed/paid_out means the chargeback itself
        // was reversed; there is nothing to adjust.
        if matches!(
            payment.status,
            PaymentStatus::Confirmed | PaymentStatus::PaidOut
        ) {
            debug!(payment = %payment.id, "chargeback no longer in effect; skipping");
            continue;
        }
        let settled = event.action == CHARGEBACK_SETTLED;
        let details = if settled {
            // Settlement events carry no reason code; it lives on the
            // original charged_back event for the same payment.
            charged_back_origin(ctx, &payment).await?
        } else {
            event.details.clone()
        };
        let account = ctx.customer_account(&mandate).await?;
        let (name, number) = counterparty(ctx.locale, account.as_ref());
        adjustments.insert(
            payment.id.clone(),
            Transaction {
                amount: -major_units(payment.amount),
                booked: settled,
                booking_date: dates::local_date(event.created_at),
                value_date: None,
                currency: payment.currency.clone(),
                counterpart_name: Some(name),
                counterpart_account: number,
                reference: payment.id.clone(),
                booking_text: ctx.locale.chargeback().to_string(),
                purpose: details_purpose(&details),
            },
        );
    }
    Ok(())
}

async fn charged_back_origin(
    ctx: &SyncContext<'_>,
    payment: &Payment,
) -> SyncResult<EventDetails> {
    let mut pager = ctx.pager::<Event>(
        ResourceKind::Events,
        vec![
            ("resource_type".to_string(), "payments".to_string()),
            ("action".to_string(), CHARGED_BACK.to_string()),
            ("payment".to_string(), payment.id.clone()),
        ],
    );
    match pager.next().await? {
        Some(origin) => Ok(origin.details),
        None => Err(SyncError::MissingChargebackOrigin {
            payment: payment.id.clone(),
        }),
    }
}

/// Failed and returned refunds restore funds to the creditor, offsetting
/// the booked refund debit; booked only once the funds are confirmed back.
async fn refund_reversals(
    ctx: &SyncContext<'_>,
    action: &str,
    adjustments: &mut BTreeMap<String, Transaction>,
) -> SyncResult<()> {
    let mut pager =
        ctx.pager::<Event>(ResourceKind::Events, event_params(ctx, "refunds", action, "refund"));
    while let Some(event) = pager.next().await? {
        let refund_id = event
            .links
            .refund
            .as_deref()
            .ok_or_else(|| SyncError::MissingLink {
                kind: "event",
                id: event.id.clone(),
                relation: "refund",
            })?;
        let refund: Refund = ctx.resolve(ResourceKind::Refunds, refund_id).await?;
        let (mandate, _origin) = ctx.mandate_for_refund(&refund).await?;
        if !ctx.owns(&mandate) {
            debug!(event = %event.id, mandate = %mandate.id, "skipping event for foreign creditor");
            continue;
        }
        let returned = event.action == FUNDS_RETURNED;
        let account = ctx.customer_account(&mandate).await?;
        let (name, number) = counterparty(ctx.locale, account.as_ref());
        adjustments.insert(
            refund.id.clone(),
            Transaction {
                amount: major_units(refund.amount),
                booked: returned,
                booking_date: dates::local_date(event.created_at),
                value_date: None,
                currency: refund.currency.clone(),
                counterpart_name: Some(name),
                counterpart_account: number,
                reference: refund.id.clone(),
                booking_text: if returned {
                    ctx.locale.refund_returned().to_string()
                } else {
                    format!("{}: {}", ctx.locale.failed(), ctx.locale.refund())
                },
                purpose: details_purpose(&event.details),
            },
        );
    }
    Ok(())
}

/// Resolve the payment an event points at, plus its mandate; `None` when
/// the mandate belongs to a different creditor.
async fn affected_payment(
    ctx: &SyncContext<'_>,
    event: &Event,
) -> SyncResult<Option<(Payment, Mandate)>> {
    let payment_id = event
        .links
        .payment
        .as_deref()
        .ok_or_else(|| SyncError::MissingLink {
            kind: "event",
            id: event.id.clone(),
            relation: "payment",
        })?;
    let payment: Payment = ctx.resolve(ResourceKind::Payments, payment_id).await?;
    let mandate = ctx.mandate_for_payment(&payment).await?;
    if !ctx.owns(&mandate) {
        debug!(event = %event.id, mandate = %mandate.id, "skipping event for foreign creditor");
        return Ok(None);
    }
    Ok(Some((payment, mandate)))
}

fn details_purpose(details: &EventDetails) -> Option<String> {
    match (details.reason_code.as_deref(), details.description.as_deref()) {
        (Some(code), Some(description)) => Some(format!("{code}: {description}")),
        (Some(code), None) => Some(code.to_string()),
        (None, Some(description)) => Some(description.to_string()),
        (None, None) => details.cause.clone(),
    }
}
