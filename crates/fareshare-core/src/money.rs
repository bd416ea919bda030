//! # Money Module
//!
//! Cent rounding and display formatting for trip amounts.
//!
//! ## Why Floats Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FLOATS IN, CENTS OUT                                                   │
//! │                                                                         │
//! │  Equal splits are computed in floating point with NO per-person        │
//! │  rounding:                                                              │
//! │    $100.00 / 3 = 33.333...  (×3 = 100.00, balances still sum to 0)     │
//! │                                                                         │
//! │  Rounding happens only at the edges:                                   │
//! │    • the debt minimizer rounds balances and payments to cents          │
//! │    • the reporters round per-person totals to cents                    │
//! │    • the front end rounds entered amounts to cents                     │
//! │                                                                         │
//! │  Rounding is half-up toward +∞:  -0.005 → -0.00,  0.005 → 0.01         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fareshare_core::money::{format_currency, round_to_cents};
//!
//! assert_eq!(round_to_cents(33.333_333), 33.33);
//! assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
//! ```

// =============================================================================
// Constants
// =============================================================================

/// Smallest amount the debt minimizer treats as owed.
///
/// Balances inside (-0.01, 0.01) after rounding count as settled, and a
/// payment must round to more than this to be emitted.
pub const SETTLEMENT_THRESHOLD: f64 = 0.01;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds an amount to two decimal places, halves toward positive infinity.
///
/// ## Example
/// ```rust
/// use fareshare_core::money::round_to_cents;
///
/// assert_eq!(round_to_cents(10.004), 10.0);
/// assert_eq!(round_to_cents(-30.0), -30.0);
/// assert_eq!(round_to_cents(-0.005), 0.0);
/// ```
#[inline]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Converts an amount to whole cents (for display and storage-free comparisons).
#[inline]
pub fn to_cents(value: f64) -> i64 {
    (value * 100.0 + 0.5).floor() as i64
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Returns the display symbol for a currency code, if it has one.
fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        "CAD" => Some("CA$"),
        "AUD" => Some("A$"),
        "MXN" => Some("MX$"),
        "BRL" => Some("R$"),
        "KRW" => Some("₩"),
        _ => None,
    }
}

/// Groups the integer part with commas: 1234567 → "1,234,567".
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats an amount for display with a currency symbol and two decimals.
///
/// This is a presentation helper for front ends; the engine never calls it.
/// Codes without a known symbol are prefixed with the code itself.
///
/// ## Example
/// ```rust
/// use fareshare_core::money::format_currency;
///
/// assert_eq!(format_currency(30.0, "USD"), "$30.00");
/// assert_eq!(format_currency(-5.5, "EUR"), "-€5.50");
/// assert_eq!(format_currency(12.0, "CHF"), "CHF 12.00");
/// ```
pub fn format_currency(amount: f64, currency: &str) -> String {
    let cents = to_cents(amount);
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let number = format!("{}.{:02}", group_thousands(abs / 100), abs % 100);

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{currency} {number}"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(0.0), 0.0);
        assert_eq!(round_to_cents(33.333_333_333), 33.33);
        assert_eq!(round_to_cents(66.666_666_666), 66.67);
        assert_eq!(round_to_cents(-33.333_333_333), -33.33);
        assert_eq!(round_to_cents(-66.666_666_666), -66.67);
    }

    #[test]
    fn test_round_half_goes_up() {
        // Half a cent below zero is not a debt
        assert_eq!(round_to_cents(-0.005), 0.0);
        assert_eq!(round_to_cents(-0.004), 0.0);
        assert_eq!(round_to_cents(0.004), 0.0);
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(10.99), 1099);
        assert_eq!(to_cents(-5.5), -550);
        assert_eq!(to_cents(0.1 + 0.2), 30);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, "USD"), "$0.00");
        assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0, "GBP"), "£1,000,000.00");
        assert_eq!(format_currency(-30.0, "USD"), "-$30.00");
        assert_eq!(format_currency(999.999, "EUR"), "€1,000.00");
        assert_eq!(format_currency(7.0, "SEK"), "SEK 7.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
