//! Repayment schedule computation.
//!
//! This module implements the amortization calculator:
//! - Flat-profit (Mourabaha) schedules with up-front profit
//! - Standard amortizing schedules with per-period interest
//! - Due-date generation with month-end clamping
//! - Error types for schedule parameter validation

pub mod calculator;
pub mod error;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use calculator::AmortizationCalculator;
pub use error::ScheduleError;
pub use types::{Installment, Periodicity, RepaymentPlan, ScheduleMode, ScheduleParams};
