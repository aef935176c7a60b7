//! Property-based tests for AmortizationCalculator.
//!
//! Feature: schedule-core
//! - Property 1: Principal Conservation
//! - Property 2: Row Count Equals Duration
//! - Property 3: Balance Runs Down To Zero
//! - Property 4: Computation Is Deterministic

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::AmortizationCalculator;
use super::types::{Periodicity, ScheduleMode, ScheduleParams};

/// Strategy to generate positive principals (1 to 100,000,000 minor units).
fn principal_strategy() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

/// Strategy to generate durations (1 to 60 installments).
fn duration_strategy() -> impl Strategy<Value = u32> {
    1u32..=60u32
}

/// Strategy to generate annual rates (0.00% to 40.00%).
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=4_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate a periodicity.
fn periodicity_strategy() -> impl Strategy<Value = Periodicity> {
    prop_oneof![
        Just(Periodicity::Daily),
        Just(Periodicity::Weekly),
        Just(Periodicity::Monthly),
    ]
}

/// Strategy to generate a schedule mode.
fn mode_strategy() -> impl Strategy<Value = ScheduleMode> {
    prop_oneof![Just(ScheduleMode::FlatProfit), Just(ScheduleMode::Amortizing)]
}

/// Strategy to generate a full parameter set.
fn params_strategy() -> impl Strategy<Value = ScheduleParams> {
    (
        principal_strategy(),
        duration_strategy(),
        rate_strategy(),
        periodicity_strategy(),
        mode_strategy(),
        0u64..3_650u64,
    )
        .prop_map(
            |(principal, duration_units, annual_rate_pct, periodicity, mode, day_offset)| {
                let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
                ScheduleParams {
                    principal,
                    duration_units,
                    periodicity,
                    annual_rate_pct,
                    first_due_date: base + chrono::Days::new(day_offset),
                    mode,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// **Property 1: Principal Conservation**
    ///
    /// *For any* valid parameter set, the principal components sum to the
    /// original principal exactly.
    #[test]
    fn prop_principal_components_sum_to_principal(params in params_strategy()) {
        let plan = AmortizationCalculator::compute_schedule(&params).unwrap();
        prop_assert_eq!(plan.total_principal(), params.principal);
    }

    /// **Property 2: Row Count Equals Duration**
    ///
    /// *For any* valid parameter set, the plan has exactly `duration_units`
    /// rows with contiguous 1-based sequence numbers.
    #[test]
    fn prop_row_count_equals_duration(params in params_strategy()) {
        let plan = AmortizationCalculator::compute_schedule(&params).unwrap();
        prop_assert_eq!(plan.len(), params.duration_units as usize);
        for (i, row) in plan.installments.iter().enumerate() {
            prop_assert_eq!(row.sequence as usize, i + 1);
        }
    }

    /// **Property 3: Balance Runs Down To Zero**
    ///
    /// *For any* valid parameter set, the remaining balance is monotonically
    /// non-increasing and exactly zero on the last row, and every row's
    /// payment equals its principal plus profit component.
    #[test]
    fn prop_balance_monotone_to_zero(params in params_strategy()) {
        let plan = AmortizationCalculator::compute_schedule(&params).unwrap();
        let mut prev = i64::MAX;
        for row in &plan.installments {
            prop_assert!(row.principal >= 0);
            prop_assert!(row.profit >= 0);
            prop_assert_eq!(row.payment, row.principal + row.profit);
            prop_assert!(row.remaining_balance <= prev);
            prev = row.remaining_balance;
        }
        prop_assert_eq!(plan.installments.last().unwrap().remaining_balance, 0);
        prop_assert_eq!(
            plan.total_repayable(),
            plan.total_principal() + plan.total_profit()
        );
    }

    /// **Property 4: Computation Is Deterministic**
    ///
    /// *For any* valid parameter set, computing the schedule twice yields
    /// identical plans.
    #[test]
    fn prop_schedule_is_deterministic(params in params_strategy()) {
        let first = AmortizationCalculator::compute_schedule(&params).unwrap();
        let second = AmortizationCalculator::compute_schedule(&params).unwrap();
        prop_assert_eq!(first, second);
    }

    /// **Property 5: Flat Installments Never Undershoot**
    ///
    /// *For any* flat-profit plan, no non-final payment exceeds the rounded-up
    /// installment and the final row clears the remainder.
    #[test]
    fn prop_flat_final_row_absorbs_remainder(
        principal in principal_strategy(),
        duration in duration_strategy(),
        rate in rate_strategy(),
    ) {
        let params = ScheduleParams {
            principal,
            duration_units: duration,
            periodicity: Periodicity::Monthly,
            annual_rate_pct: rate,
            first_due_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            mode: ScheduleMode::FlatProfit,
        };
        let plan = AmortizationCalculator::compute_schedule(&params).unwrap();
        let total = plan.total_repayable();
        let units = i64::from(params.duration_units);
        let installment = (total + units - 1) / units;
        for row in &plan.installments[..plan.len() - 1] {
            prop_assert!(row.payment <= installment);
        }
    }
}
