use crate::resources::{PaymentStatus, PayoutStatus, RefundStatus};

impl PaymentStatus {
    /// A payment is final from the ledger's perspective once it is confirmed
    /// or paid out, and also once it failed or was charged back: the
    /// reversal pass pairs the latter two with an offsetting adjustment.
    pub fn is_booked(self) -> bool {
        matches!(
            self,
            PaymentStatus::Confirmed
                | PaymentStatus::PaidOut
                | PaymentStatus::Failed
                | PaymentStatus::ChargedBack
        )
    }
}

impl PayoutStatus {
    pub fn is_booked(self) -> bool {
        matches!(self, PayoutStatus::Paid)
    }
}

impl RefundStatus {
    pub fn is_booked(self) -> bool {
        matches!(
            self,
            RefundStatus::Submitted
                | RefundStatus::Paid
                | RefundStatus::Bounced
                | RefundStatus::FundsReturned
        )
    }
}
