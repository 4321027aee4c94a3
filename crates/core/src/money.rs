//! Zero-safe arithmetic for financial figures.
//!
//! Amounts arrive from the CRM as floating point euros. Every ratio shown in a
//! view goes through these helpers so that a zero denominator yields a
//! sentinel `0.0` and never NaN or infinity.

/// `numerator / denominator`, or `0.0` when the denominator is zero or the
/// quotient is not finite.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() { ratio } else { 0.0 }
}

/// `numerator / denominator * 100`, with the same zero policy as [`safe_ratio`].
pub fn safe_percent(numerator: f64, denominator: f64) -> f64 {
    let percent = safe_ratio(numerator, denominator) * 100.0;
    if percent.is_finite() { percent } else { 0.0 }
}

/// Sum an iterator of amounts.
pub fn sum<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().fold(0.0, |acc, v| acc + v)
}

/// Round to cents, the precision every table displays.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
