//! Minor-currency-unit amounts and rounding helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Monetary amounts are `i64` minor units (the smallest indivisible unit of
//! account); `rust_decimal::Decimal` appears only in intermediate rate math
//! and is rounded back to minor units through the helpers below.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// A signed monetary amount in minor currency units.
pub type MinorUnits = i64;

/// Rounds a decimal amount UP to the next minor unit.
///
/// Used where rounding loss must fall on the payer side (e.g. Mourabaha
/// installment amounts).
///
/// Returns `None` if the result does not fit in an `i64`.
#[must_use]
pub fn to_minor_units_ceil(value: Decimal) -> Option<MinorUnits> {
    value.ceil().to_i64()
}

/// Rounds a decimal amount to the nearest minor unit, half away from zero.
///
/// Returns `None` if the result does not fit in an `i64`.
#[must_use]
pub fn to_minor_units_half_up(value: Decimal) -> Option<MinorUnits> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
