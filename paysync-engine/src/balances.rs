use std::collections::BTreeMap;

use paysync_core::{major_units, Balance, BalanceLine};
use rust_decimal::Decimal;
use tracing::warn;

const CONFIRMED_FUNDS: &str = "confirmed_funds";
const PENDING_PAYMENTS_SUBMITTED: &str = "pending_payments_submitted";
const PENDING_PAYOUT: &str = "pending_payout";

/// Fold the balance collection into display lines: one line per
/// confirmed-funds entry, and exactly one netted pending line per currency
/// (submitted payments minus pending payouts), even when the API reports
/// the contributing types separately. Unrecognized types are skipped.
pub fn aggregate(balances: &[Balance]) -> Vec<BalanceLine> {
    let mut lines = Vec::new();
    let mut pending: BTreeMap<String, Decimal> = BTreeMap::new();
    for balance in balances {
        match balance.balance_type.as_str() {
            CONFIRMED_FUNDS => lines.push(BalanceLine {
                currency: balance.currency.clone(),
                amount: major_units(balance.amount),
                pending: false,
            }),
            PENDING_PAYMENTS_SUBMITTED => {
                *pending.entry(balance.currency.clone()).or_default() +=
                    major_units(balance.amount);
            }
            PENDING_PAYOUT => {
                *pending.entry(balance.currency.clone()).or_default() -=
                    major_units(balance.amount);
            }
            other => {
                warn!(balance_type = %other, currency = %balance.currency, "ignoring unrecognized balance type");
            }
        }
    }
    lines.extend(pending.into_iter().map(|(currency, amount)| BalanceLine {
        currency,
        amount,
        pending: true,
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn balance(balance_type: &str, amount: i64, currency: &str) -> Balance {
        Balance {
            balance_type: balance_type.to_string(),
            amount,
            currency: currency.to_string(),
        }
    }

    #[test]
    fn nets_pending_per_currency() {
        let lines = aggregate(&[
            balance("confirmed_funds", 12345, "EUR"),
            balance("pending_payments_submitted", 3000, "EUR"),
            balance("pending_payout", 1000, "EUR"),
            balance("pending_payments_submitted", 500, "GBP"),
        ]);
        assert_eq!(
            lines,
            vec![
                BalanceLine {
                    currency: "EUR".into(),
                    amount: dec!(123.45),
                    pending: false,
                },
                BalanceLine {
                    currency: "EUR".into(),
                    amount: dec!(20.00),
                    pending: true,
                },
                BalanceLine {
                    currency: "GBP".into(),
                    amount: dec!(5.00),
                    pending: true,
                },
            ]
        );
    }

    #[test]
    fn keeps_confirmed_entries_separate() {
        let lines = aggregate(&[
            balance("confirmed_funds", 100, "EUR"),
            balance("confirmed_funds", 200, "GBP"),
        ]);
        assert_eq!(lines.iter().filter(|line| !line.pending).count(), 2);
    }

    #[test]
    fn ignores_unknown_balance_types() {
        let lines = aggregate(&[
            balance("promotional_credit", 999, "EUR"),
            balance("confirmed_funds", 100, "EUR"),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, dec!(1.00));
    }
}
