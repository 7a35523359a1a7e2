//! Number rendering for breakdown strings.
//!
//! Arithmetic always runs at full precision; rounding happens only here.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fixed number of decimals, halves rounded away from zero
pub fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Shortest rendering of an input value (`1800`, `24.6`, `0.5`)
pub fn plain(value: Decimal) -> String {
    value.normalize().to_string()
}
