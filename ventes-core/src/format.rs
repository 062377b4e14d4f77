//! Formatting helpers for persisted result text.

/// Format a currency amount with exactly two decimal places and the
/// fixed EUR suffix used in stored analysis results.
pub fn format_eur(value: f64) -> String {
    format!("{:.2} EUR", value)
}
