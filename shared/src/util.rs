//! Small shared helpers

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

/// Rounding for monetary display values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary amount to 2 decimal places for display.
///
/// Stored amounts keep full precision; call this only at the presentation
/// or serialization boundary.
pub fn round_money(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Format a monetary amount with exactly 2 decimal places
pub fn format_money(value: f64) -> String {
    format!("{:.2}", round_money(value))
}
