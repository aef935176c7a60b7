//! Core business logic for Tayseer.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, the decision policy, schedule math and
//! the treasury ledger live here.
//!
//! # Modules
//!
//! - `schedule` - Amortization and flat-profit repayment schedules
//! - `risk` - Deterministic credit decision policy
//! - `treasury` - Fund-movement ledger over the fixed chart of accounts
//! - `credit` - Credit request lifecycle orchestration
//! - `advisory` - Non-binding advisory annotations

pub mod advisory;
pub mod credit;
pub mod risk;
pub mod schedule;
pub mod treasury;

pub use advisory::{AdvisoryProvider, NoAdvisory};
pub use credit::{CreditError, CreditLifecycleManager, CreditRequest, RequestStatus};
pub use risk::{
    ApplicationSnapshot, Decision, DecisionStatus, FinancingKind, PolicyConfig, RiskPolicyEngine,
};
pub use schedule::{
    AmortizationCalculator, Installment, Periodicity, RepaymentPlan, ScheduleError, ScheduleMode,
    ScheduleParams,
};
pub use treasury::{Ledger, LedgerMovement, MovementInput, TreasuryAccount, TreasuryError};
