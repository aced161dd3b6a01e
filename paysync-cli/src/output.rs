use anyhow::Result;
use paysync_engine::RefreshOutcome;

/// Human-readable refresh summary: balances first, then one line per
/// transaction in synthesis order.
pub fn print_summary(outcome: &RefreshOutcome) {
    for line in &outcome.balances {
        let marker = if line.pending { "pending" } else { "balance" };
        println!("{marker}  {:>12}  {}", line.amount, line.currency);
    }
    for transaction in &outcome.transactions {
        let state = if transaction.booked { "booked" } else { "pending" };
        let counterpart = transaction.counterpart_name.as_deref().unwrap_or("-");
        println!(
            "{}  {state:7}  {:>12} {}  {}  {}  {}",
            transaction.booking_date,
            transaction.amount,
            transaction.currency,
            transaction.reference,
            transaction.booking_text,
            counterpart,
        );
    }
}

/// One JSON document per line: balances, then transactions.
pub fn print_json(outcome: &RefreshOutcome) -> Result<()> {
    for line in &outcome.balances {
        println!("{}", serde_json::to_string(line)?);
    }
    for transaction in &outcome.transactions {
        println!("{}", serde_json::to_string(transaction)?);
    }
    Ok(())
}
