//! Credit request entity and status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tayseer_shared::{ApplicantId, CreditRequestId, MerchantId, MinorUnits, ReviewerId};

use crate::risk::{ApplicationSnapshot, DecisionStatus, RiskRule};
use crate::schedule::RepaymentPlan;

/// Lifecycle status of a credit request.
///
/// The valid transitions are:
/// - Submitted → Approved / Rejected / Review (decision, recorded once)
/// - Review → Approved / Rejected (authorized override only)
/// - Approved → Active (disbursement)
/// - Active → PartiallyRepaid / Closed
/// - PartiallyRepaid → Closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Request received, decision pending.
    Submitted,
    /// Approved; disbursement pending.
    Approved,
    /// Rejected (terminal).
    Rejected,
    /// Held for manual review.
    Review,
    /// Disbursed; repayments accepted.
    Active,
    /// Partially repaid; repayments accepted.
    PartiallyRepaid,
    /// Fully repaid (terminal).
    Closed,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Review => "review",
            Self::Active => "active",
            Self::PartiallyRepaid => "partially_repaid",
            Self::Closed => "closed",
        }
    }

    /// Returns true if the transition to `next` is allowed.
    #[must_use]
    pub const fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Submitted,
                Self::Approved | Self::Rejected | Self::Review
            ) | (Self::Review, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Active)
                | (Self::Active, Self::PartiallyRepaid | Self::Closed)
                | (Self::PartiallyRepaid, Self::Closed)
        )
    }

    /// Returns true if the request accepts repayments in this status.
    #[must_use]
    pub const fn accepts_repayment(&self) -> bool {
        matches!(self, Self::Active | Self::PartiallyRepaid)
    }

    /// Returns true for terminal states.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Closed)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<DecisionStatus> for RequestStatus {
    fn from(status: DecisionStatus) -> Self {
        match status {
            DecisionStatus::Approved => Self::Approved,
            DecisionStatus::Rejected => Self::Rejected,
            DecisionStatus::Review => Self::Review,
        }
    }
}

/// A credit request record.
///
/// Created on submission, mutated only by repayment postings or an
/// authorized reviewer override; never deleted, only superseded in status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRequest {
    /// Unique identifier.
    pub id: CreditRequestId,
    /// The applicant.
    pub applicant_id: ApplicantId,
    /// The merchant counterparty.
    pub merchant_id: MerchantId,
    /// Financed amount in minor units.
    pub amount: MinorUnits,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// The policy rule that decided the request.
    pub decision_rule: RiskRule,
    /// Deterministic decision rationale.
    pub decision_reason: String,
    /// Non-binding advisory text attached at decision time.
    pub advisory: Option<String>,
    /// Repayment plan; present once approved.
    pub plan: Option<RepaymentPlan>,
    /// The snapshot the decision was made on, kept for audit and for
    /// override-time plan computation.
    pub snapshot: ApplicationSnapshot,
    /// Cumulative repaid amount in minor units.
    pub repaid: MinorUnits,
    /// Reviewer who overrode the decision, if any.
    pub reviewed_by: Option<ReviewerId>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CreditRequest {
    /// Total repayable under the attached plan, zero when no plan exists.
    #[must_use]
    pub fn plan_total(&self) -> MinorUnits {
        self.plan.as_ref().map_or(0, RepaymentPlan::total_repayable)
    }

    /// Outstanding balance: plan total minus cumulative repayments.
    #[must_use]
    pub fn outstanding(&self) -> MinorUnits {
        self.plan_total() - self.repaid
    }
}
