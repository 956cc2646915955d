//! Currency and percentage normalization at the ledger boundary
//!
//! Upstream sources hand balances and payments around as formatted strings
//! ("$12,345.67") as often as numbers. Everything entering the engine goes
//! through one normalizer so the calculation core only ever sees
//! non-negative f64 amounts.

/// Parse a formatted currency string to a non-negative amount.
///
/// Accepts currency symbols, thousands separators, and surrounding
/// whitespace. Anything unparseable normalizes to 0.0; negative inputs
/// (including accounting-style parentheses) clamp to 0.0. Never panics,
/// never returns NaN.
pub fn parse_currency(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // Accounting negatives like "(1,234.56)" clamp to zero below
    let negative = trimmed.starts_with('(') && trimmed.ends_with(')')
        || trimmed.starts_with('-');

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if negative {
                0.0
            } else {
                value
            }
        }
        _ => 0.0,
    }
}

/// Parse a percentage string ("6.75%", "6.75") to a non-negative rate.
///
/// Same failure policy as [`parse_currency`]: malformed input is 0.0.
pub fn parse_percent(input: &str) -> f64 {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Clamp an already-numeric amount to the non-negative range the core
/// assumes, mapping NaN and negative infinity to 0.0.
pub fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
