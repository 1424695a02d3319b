//! Prediction Engine Module
//!
//! Pure calculation logic for food costing and prep prediction. Nothing
//! in here touches the database or the network; callers fetch rows,
//! feed them in, and persist the results.

mod calibration;
mod covers;
mod food_cost;
mod predictor;

pub use calibration::*;
pub use covers::*;
pub use food_cost::*;
pub use predictor::*;

use rust_decimal::prelude::*;

/// Convert f64 to Decimal for calculation
#[inline]
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to `dp` decimal places, half away from zero, back to f64.
/// Rounding happens only at result boundaries, never on intermediate sums.
#[inline]
pub(crate) fn round_dp(value: f64, dp: u32) -> f64 {
    to_decimal(value)
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round to the nearest integer, half away from zero
#[inline]
pub(crate) fn round_whole(value: f64) -> i64 {
    to_decimal(value)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
