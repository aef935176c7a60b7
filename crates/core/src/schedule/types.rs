//! Schedule domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tayseer_shared::MinorUnits;

/// How often installments fall due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    /// One installment per day.
    Daily,
    /// One installment per week.
    Weekly,
    /// One installment per month.
    Monthly,
}

impl Periodicity {
    /// Returns the string representation of the periodicity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Number of periods in a year, used to scale annual rates.
    #[must_use]
    pub fn periods_per_year(&self) -> Decimal {
        match self {
            Self::Daily => Decimal::from(365u32),
            Self::Weekly => Decimal::from(52u32),
            Self::Monthly => Decimal::from(12u32),
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schedule computation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// Mourabaha: total profit is a fixed markup computed up front,
    /// installments round UP so rounding loss never falls on the lender.
    FlatProfit,
    /// Standard amortizing credit: per-period interest on the remaining
    /// principal, constant payment, final row clears the exact remainder.
    Amortizing,
}

/// Input parameters for schedule computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// Amount financed, in minor currency units. Must be positive.
    pub principal: MinorUnits,
    /// Number of installments. Must be at least one.
    pub duration_units: u32,
    /// How often installments fall due.
    pub periodicity: Periodicity,
    /// Annual rate (amortizing) or annual profit margin (flat), in percent.
    pub annual_rate_pct: Decimal,
    /// Due date of the first installment; later rows are offset from it.
    pub first_due_date: NaiveDate,
    /// Computation mode.
    pub mode: ScheduleMode,
}

/// A single row of a repayment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based, contiguous sequence number.
    pub sequence: u32,
    /// Date the payment falls due.
    pub due_date: NaiveDate,
    /// Total payment amount for this row.
    pub payment: MinorUnits,
    /// Principal component of the payment.
    pub principal: MinorUnits,
    /// Interest (amortizing) or profit (flat) component of the payment.
    pub profit: MinorUnits,
    /// Balance remaining after this payment: outstanding repayable in flat
    /// mode, outstanding principal in amortizing mode. Zero on the last row.
    pub remaining_balance: MinorUnits,
}

/// An ordered installment schedule produced by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentPlan {
    /// Mode the plan was computed under.
    pub mode: ScheduleMode,
    /// Installment rows, ordered by sequence number.
    pub installments: Vec<Installment>,
}

impl RepaymentPlan {
    /// Number of installments in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.installments.len()
    }

    /// Returns true if the plan has no installments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    /// Sum of all payment amounts.
    #[must_use]
    pub fn total_repayable(&self) -> MinorUnits {
        self.installments.iter().map(|row| row.payment).sum()
    }

    /// Sum of all principal components.
    #[must_use]
    pub fn total_principal(&self) -> MinorUnits {
        self.installments.iter().map(|row| row.principal).sum()
    }

    /// Sum of all interest/profit components.
    #[must_use]
    pub fn total_profit(&self) -> MinorUnits {
        self.installments.iter().map(|row| row.profit).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(Periodicity::Monthly.periods_per_year(), dec!(12));
        assert_eq!(Periodicity::Weekly.periods_per_year(), dec!(52));
        assert_eq!(Periodicity::Daily.periods_per_year(), dec!(365));
    }

    #[test]
    fn test_periodicity_display() {
        assert_eq!(Periodicity::Monthly.to_string(), "monthly");
        assert_eq!(Periodicity::Daily.to_string(), "daily");
    }

    #[test]
    fn test_plan_totals() {
        let row = |sequence, payment, principal, profit, remaining_balance| Installment {
            sequence,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            payment,
            principal,
            profit,
            remaining_balance,
        };
        let plan = RepaymentPlan {
            mode: ScheduleMode::FlatProfit,
            installments: vec![row(1, 60, 50, 10, 60), row(2, 60, 50, 10, 0)],
        };
        assert_eq!(plan.len(), 2);
        assert!(!plan.is_empty());
        assert_eq!(plan.total_repayable(), 120);
        assert_eq!(plan.total_principal(), 100);
        assert_eq!(plan.total_profit(), 20);
    }
}
