use crate::models::instrument::DOMESTIC_CURRENCY;

const MILLION: f64 = 1_000_000.0;

/// Round half away from zero to two decimals, without a negative zero
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Amount in millions, as charted
pub fn to_millions(value: f64) -> f64 {
    value / MILLION
}

/// Format an amount for display.
///
/// Domestic currency is shown in millions with an `M` suffix
/// (64,230,000 VND -> `64.23M`), anything else as a plain two-decimal number
/// (2,345.6 USD -> `2345.60`).
pub fn format_price(value: f64, currency: &str) -> String {
    if currency == DOMESTIC_CURRENCY {
        // Round on hundredths of a million directly so 15,000 lands on 0.02
        let hundredths = (value / 10_000.0).round() + 0.0;
        format!("{:.2}M", hundredths / 100.0)
    } else {
        format!("{:.2}", round_cents(value))
    }
}

/// Like `format_price`, with an explicit `+` for positive changes
pub fn format_change(value: f64, currency: &str) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{}", sign, format_price(value, currency))
}
