//! Money conversion helpers
//!
//! Prices travel as JSON numbers (f64) on the catalog and remote cart
//! wire; all arithmetic happens in `Decimal` and results are rounded back
//! to 2 decimal places at the boundary.

use rust_decimal::prelude::*;

/// Decimal places for currency rounding
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 wire amount to Decimal for arithmetic
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert a Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
