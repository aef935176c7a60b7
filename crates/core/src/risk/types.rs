//! Risk domain types for application snapshots and decisions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tayseer_shared::{ApplicantId, MerchantId, MinorUnits};

use crate::schedule::{Periodicity, RepaymentPlan};

/// Kind tag on a past account transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Incoming transfer (income).
    Received,
    /// Outgoing transfer.
    Sent,
    /// Merchant or bill payment.
    Payment,
    /// Service fee.
    Fee,
}

impl TransactionKind {
    /// Returns true for entries that count as income.
    #[must_use]
    pub const fn is_income(&self) -> bool {
        matches!(self, Self::Received)
    }
}

/// A single entry of an applicant's transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastTransaction {
    /// Signed amount in minor units (positive = inflow).
    pub amount: MinorUnits,
    /// Kind tag.
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub timestamp: DateTime<Utc>,
}

/// Financing product requested by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingKind {
    /// Buy-Now-Pay-Later installment purchase (amortizing).
    InstallmentPurchase,
    /// Mourabaha markup financing (flat profit).
    Mourabaha,
}

impl FinancingKind {
    /// Returns the string representation of the product.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InstallmentPurchase => "installment_purchase",
            Self::Mourabaha => "mourabaha",
        }
    }
}

impl std::fmt::Display for FinancingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable input to a credit decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSnapshot {
    /// The applicant requesting financing.
    pub applicant_id: ApplicantId,
    /// The merchant counterparty of the purchase.
    pub merchant_id: MerchantId,
    /// Requested amount in minor units.
    pub amount: MinorUnits,
    /// Financing product.
    pub financing: FinancingKind,
    /// Optional free-text purpose.
    pub purpose: Option<String>,
    /// Applicant's current balance in minor units.
    pub balance: MinorUnits,
    /// Ordered past transactions, oldest first.
    pub history: Vec<PastTransaction>,
    /// Proposed number of installments.
    pub duration_units: u32,
    /// Proposed installment periodicity.
    pub periodicity: Periodicity,
    /// Due date of the first installment.
    pub first_due_date: NaiveDate,
    /// Profit margin in percent; present only for Mourabaha.
    pub margin_rate_pct: Option<Decimal>,
}

impl ApplicationSnapshot {
    /// Returns true if the history contains at least one income entry.
    #[must_use]
    pub fn has_income_entry(&self) -> bool {
        self.history.iter().any(|t| t.kind.is_income())
    }
}

/// Binding decision status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Application is approved; a repayment plan is attached.
    Approved,
    /// Application is rejected.
    Rejected,
    /// Application needs manual review.
    Review,
}

impl DecisionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Review => "review",
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Machine-readable name of the policy rule that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskRule {
    /// New user asked for more than the new-user maximum.
    NewUserExcess,
    /// Applicant has no transaction history at all.
    NoHistory,
    /// All auto-approval conditions met.
    AutoApprove,
    /// Amount exceeds the product ceiling.
    ExcessiveAmount,
    /// Amount sits between auto-approval and the ceiling.
    AmountBand,
    /// History or balance coverage too thin for auto-approval.
    ThinHistory,
    /// Margin or repayment window outside the normal band.
    UnusualTerms,
}

impl RiskRule {
    /// Returns the string representation of the rule.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewUserExcess => "new_user_excess",
            Self::NoHistory => "no_history",
            Self::AutoApprove => "auto_approve",
            Self::ExcessiveAmount => "excessive_amount",
            Self::AmountBand => "amount_band",
            Self::ThinHistory => "thin_history",
            Self::UnusualTerms => "unusual_terms",
        }
    }
}

/// Output of the risk policy engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Binding status.
    pub status: DecisionStatus,
    /// The rule that fired.
    pub rule: RiskRule,
    /// Deterministic rationale derived from the fired rule.
    pub reason: String,
    /// Repayment plan; present only when approved.
    pub plan: Option<RepaymentPlan>,
    /// Optional non-binding advisory text. Never affects the status.
    pub advisory: Option<String>,
}

impl Decision {
    pub(crate) fn approved(plan: RepaymentPlan) -> Self {
        Self {
            status: DecisionStatus::Approved,
            rule: RiskRule::AutoApprove,
            reason: "within auto-approval limits".to_string(),
            plan: Some(plan),
            advisory: None,
        }
    }

    pub(crate) fn rejected(rule: RiskRule, reason: &str) -> Self {
        Self {
            status: DecisionStatus::Rejected,
            rule,
            reason: reason.to_string(),
            plan: None,
            advisory: None,
        }
    }

    pub(crate) fn review(rule: RiskRule, reason: &str) -> Self {
        Self {
            status: DecisionStatus::Review,
            rule,
            reason: reason.to_string(),
            plan: None,
            advisory: None,
        }
    }
}
