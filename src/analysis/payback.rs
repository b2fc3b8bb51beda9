//! Payback period calculation
//!
//! The remaining balance starts at the initial investment and each period's
//! value is subtracted in order. Periods whose value is zero or negative are
//! skipped entirely: they neither reduce the balance nor pull payback earlier.
//! When the balance first reaches zero or below inside period `p`, payback is
//!
//! ```text
//! p + remaining / value      (remaining <= 0)
//! ```
//!
//! so an exact recovery at the end of a period reports `p` with no fraction.

/// Payback period over `(period, value)` pairs, or `None` if the investment is
/// not recovered within the horizon.
///
/// `periods` labels each value (normally its 1-based position). Both slices
/// must have the same length.
pub fn payback_period(investment: f64, values: &[f64], periods: &[i32]) -> Option<f64> {
    debug_assert_eq!(values.len(), periods.len());

    let mut remaining = investment;

    for (&value, &period) in values.iter().zip(periods) {
        if value <= 0.0 {
            continue;
        }

        remaining -= value;

        if remaining <= 0.0 {
            return Some(period as f64 + remaining / value);
        }
    }

    None
}
