//! Repayment schedule calculator.
//!
//! Two computation modes share the same output shape:
//! - **Flat-profit** (Mourabaha): profit is a fixed markup computed up front,
//!   the per-row installment rounds UP, and the final row absorbs the
//!   rounding remainder.
//! - **Amortizing**: constant annuity payment, per-period interest on the
//!   remaining principal, final row clears the exact remainder.
//!
//! All row arithmetic is exact in minor units; `Decimal` appears only in the
//! rate math and is rounded back through the shared helpers.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;

use tayseer_shared::{MinorUnits, to_minor_units_ceil, to_minor_units_half_up};

use super::error::ScheduleError;
use super::types::{Installment, Periodicity, RepaymentPlan, ScheduleMode, ScheduleParams};

/// Stateless calculator for installment schedules.
pub struct AmortizationCalculator;

impl AmortizationCalculator {
    /// Computes a repayment plan from the given parameters.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError` if the principal is not positive, the duration
    /// is zero, the rate is negative, or an amount/date leaves the
    /// representable range.
    pub fn compute_schedule(params: &ScheduleParams) -> Result<RepaymentPlan, ScheduleError> {
        Self::validate(params)?;

        let installments = match params.mode {
            ScheduleMode::FlatProfit => Self::flat_profit_rows(params)?,
            ScheduleMode::Amortizing => Self::amortizing_rows(params)?,
        };

        Ok(RepaymentPlan {
            mode: params.mode,
            installments,
        })
    }

    fn validate(params: &ScheduleParams) -> Result<(), ScheduleError> {
        if params.principal <= 0 {
            return Err(ScheduleError::NonPositivePrincipal(params.principal));
        }
        if params.duration_units == 0 {
            return Err(ScheduleError::ZeroDuration);
        }
        if params.annual_rate_pct < Decimal::ZERO {
            return Err(ScheduleError::NegativeRate(params.annual_rate_pct));
        }
        Ok(())
    }

    /// Flat-profit rows: `total_profit = principal * rate * year_fraction`,
    /// installment = ceil(total_repayable / n).
    fn flat_profit_rows(params: &ScheduleParams) -> Result<Vec<Installment>, ScheduleError> {
        let n = params.duration_units;
        let principal = params.principal;

        let rate = params.annual_rate_pct / Decimal::ONE_HUNDRED;
        let year_fraction = Decimal::from(n) / params.periodicity.periods_per_year();
        let profit_dec = Decimal::from(principal)
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(year_fraction))
            .ok_or(ScheduleError::AmountOutOfRange)?;
        let total_profit =
            to_minor_units_half_up(profit_dec).ok_or(ScheduleError::AmountOutOfRange)?;
        let total_repayable = principal
            .checked_add(total_profit)
            .ok_or(ScheduleError::AmountOutOfRange)?;

        // Round UP: the lender never loses the sub-unit remainder.
        let installment: MinorUnits =
            to_minor_units_ceil(Decimal::from(total_repayable) / Decimal::from(n))
                .ok_or(ScheduleError::AmountOutOfRange)?;
        let profit_share = Decimal::from(total_profit) / Decimal::from(total_repayable);

        let mut rows = Vec::with_capacity(n as usize);
        let mut remaining_principal = principal;
        let mut remaining_profit = total_profit;

        for sequence in 1..=n {
            let remaining_repayable = remaining_principal + remaining_profit;
            let last = sequence == n;

            let payment = if last {
                remaining_repayable
            } else {
                installment.min(remaining_repayable)
            };

            // Proportional split; the final row absorbs all rounding drift.
            let (principal_part, profit_part) = if last {
                (remaining_principal, remaining_profit)
            } else {
                let mut profit_part = to_minor_units_half_up(Decimal::from(payment) * profit_share)
                    .ok_or(ScheduleError::AmountOutOfRange)?
                    .min(remaining_profit);
                let mut principal_part = payment - profit_part;
                if principal_part > remaining_principal {
                    principal_part = remaining_principal;
                    profit_part = payment - principal_part;
                }
                (principal_part, profit_part)
            };

            remaining_principal -= principal_part;
            remaining_profit -= profit_part;

            rows.push(Installment {
                sequence,
                due_date: Self::due_date(params.first_due_date, params.periodicity, sequence - 1)?,
                payment,
                principal: principal_part,
                profit: profit_part,
                remaining_balance: remaining_principal + remaining_profit,
            });
        }

        Ok(rows)
    }

    /// Amortizing rows: constant annuity payment, interest on the remaining
    /// principal each period, final row clears the exact remainder.
    fn amortizing_rows(params: &ScheduleParams) -> Result<Vec<Installment>, ScheduleError> {
        let n = params.duration_units;
        let principal_dec = Decimal::from(params.principal);
        let periodic_rate =
            params.annual_rate_pct / Decimal::ONE_HUNDRED / params.periodicity.periods_per_year();

        let payment = if periodic_rate.is_zero() {
            to_minor_units_half_up(principal_dec / Decimal::from(n))
        } else {
            // (1 + r)^n by repeated multiplication; durations are small.
            let mut growth = Decimal::ONE;
            for _ in 0..n {
                growth = growth
                    .checked_mul(Decimal::ONE + periodic_rate)
                    .ok_or(ScheduleError::AmountOutOfRange)?;
            }
            let annuity = principal_dec
                .checked_mul(periodic_rate)
                .and_then(|v| v.checked_mul(growth))
                .ok_or(ScheduleError::AmountOutOfRange)?
                / (growth - Decimal::ONE);
            to_minor_units_half_up(annuity)
        }
        .ok_or(ScheduleError::AmountOutOfRange)?;

        let mut rows = Vec::with_capacity(n as usize);
        let mut remaining = params.principal;

        for sequence in 1..=n {
            let last = sequence == n;
            let interest_dec = Decimal::from(remaining)
                .checked_mul(periodic_rate)
                .ok_or(ScheduleError::AmountOutOfRange)?;
            let interest =
                to_minor_units_half_up(interest_dec).ok_or(ScheduleError::AmountOutOfRange)?;

            let principal_part = if last {
                remaining
            } else {
                (payment - interest).clamp(0, remaining)
            };
            let row_payment = principal_part + interest;

            remaining -= principal_part;

            rows.push(Installment {
                sequence,
                due_date: Self::due_date(params.first_due_date, params.periodicity, sequence - 1)?,
                payment: row_payment,
                principal: principal_part,
                profit: interest,
                remaining_balance: remaining,
            });
        }

        Ok(rows)
    }

    /// Due date for the row at `offset` periods after the first due date.
    ///
    /// Monthly offsets are taken from the anchor date, not the previous row,
    /// so a Jan 31 anchor clamps to Feb 28 and returns to Mar 31.
    fn due_date(
        first: NaiveDate,
        periodicity: Periodicity,
        offset: u32,
    ) -> Result<NaiveDate, ScheduleError> {
        let date = match periodicity {
            Periodicity::Daily => first.checked_add_days(Days::new(u64::from(offset))),
            Periodicity::Weekly => first.checked_add_days(Days::new(u64::from(offset) * 7)),
            Periodicity::Monthly => first.checked_add_months(Months::new(offset)),
        };
        date.ok_or(ScheduleError::DueDateOutOfRange)
    }
}
