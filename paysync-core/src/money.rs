use rust_decimal::Decimal;

/// Convert an integer minor-unit amount into decimal major units.
pub fn major_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}
