/// Display label for a mandate's payment scheme. Unknown codes fall back to
/// the raw scheme string.
pub fn scheme_label(scheme: &str) -> &str {
    match scheme {
        "ach" => "ACH Direct Debit",
        "autogiro" => "Autogiro",
        "bacs" => "BACS Direct Debit",
        "becs" => "BECS Direct Debit",
        "becs_nz" => "BECS NZ Direct Debit",
        "betalingsservice" => "Betalingsservice",
        "faster_payments" => "Faster Payments",
        "pad" => "Pre-Authorized Debit",
        "sepa_core" => "SEPA Direct Debit",
        "sepa_cor1" => "SEPA COR1 Direct Debit",
        other => other,
    }
}
