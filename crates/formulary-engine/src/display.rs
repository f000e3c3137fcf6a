//! Numeric display policy for quantities and money.

/// Format a quantity: round to 3 decimal places, then drop trailing zeros and
/// a bare trailing decimal point (`1.250` -> `1.25`, `2.000` -> `2`).
pub fn format_quantity(value: f64) -> String {
    let fixed = format!("{:.3}", round_half_away(value, 1000.0));
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a monetary amount with exactly 2 decimal places.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", round_half_away(value, 100.0));
    if fixed == "-0.00" {
        "0.00".to_string()
    } else {
        fixed
    }
}

/// Round to the grid given by `scale` (100 for cents), with ties going away
/// from zero. `format!` alone rounds exact binary ties to even.
fn round_half_away(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
