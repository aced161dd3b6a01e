use std::str::FromStr;

/// Language for the handful of fixed strings that end up in synthesized
/// transactions. Everything else is passed through from the remote ledger.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Counterparty placeholder when the customer's personal data was purged.
    pub fn removed_customer(self) -> &'static str {
        match self {
            Locale::En => "removed customer",
            Locale::De => "Gelöschter Kunde",
        }
    }

    pub fn payout(self) -> &'static str {
        match self {
            Locale::En => "Payout",
            Locale::De => "Auszahlung",
        }
    }

    pub fn payout_fees(self) -> &'static str {
        match self {
            Locale::En => "Payout fees",
            Locale::De => "Auszahlungsgebühren",
        }
    }

    pub fn refund(self) -> &'static str {
        match self {
            Locale::En => "Refund",
            Locale::De => "Erstattung",
        }
    }

    pub fn failed(self) -> &'static str {
        match self {
            Locale::En => "Failed",
            Locale::De => "Fehlgeschlagen",
        }
    }

    pub fn chargeback(self) -> &'static str {
        match self {
            Locale::En => "Chargeback",
            Locale::De => "Rücklastschrift",
        }
    }

    pub fn refund_returned(self) -> &'static str {
        match self {
            Locale::En => "Refund returned",
            Locale::De => "Erstattung zurückgeführt",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}
