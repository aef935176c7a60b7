//! Credit lifecycle manager.
//!
//! Orchestrates the policy engine, the calculator and the treasury ledger
//! around a registry of credit requests. The manager exclusively owns the
//! requests it created; mutations on a given request are serialized through
//! its registry entry, so concurrent repayments cannot lose updates.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tracing::info;

use tayseer_shared::{ApplicantId, CreditRequestId, MinorUnits, ReviewerId};

use super::error::CreditError;
use super::types::{CreditRequest, RequestStatus};
use crate::advisory::AdvisoryProvider;
use crate::risk::{ApplicationSnapshot, DecisionStatus, PolicyConfig, RiskPolicyEngine};
use crate::treasury::{Ledger, TreasuryAccount, TreasuryError};

/// Orchestrator for credit requests and their repayments.
///
/// Constructed once per deployment/tenant; decisioning is delegated to the
/// embedded [`RiskPolicyEngine`] and all fund movements go through the
/// shared [`Ledger`].
pub struct CreditLifecycleManager {
    engine: RiskPolicyEngine,
    ledger: Arc<Ledger>,
    advisor: Option<Box<dyn AdvisoryProvider + Send + Sync>>,
    requests: DashMap<CreditRequestId, CreditRequest>,
    disbursement_account: TreasuryAccount,
    repayment_source: TreasuryAccount,
}

impl CreditLifecycleManager {
    /// Creates a manager over the given policy and ledger.
    ///
    /// Settlement account names from the policy are resolved against the
    /// closed treasury account set up front.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Treasury` if a settlement account name does not
    /// resolve, or names `ClientFunds` itself (both disbursement and
    /// repayment legs settle against the `ClientFunds` pool).
    pub fn new(config: PolicyConfig, ledger: Arc<Ledger>) -> Result<Self, CreditError> {
        let disbursement_account =
            TreasuryAccount::resolve(&config.settlement.disbursement_account)?;
        let repayment_source =
            TreasuryAccount::resolve(&config.settlement.repayment_source_account)?;
        for account in [disbursement_account, repayment_source] {
            if account == TreasuryAccount::ClientFunds {
                return Err(TreasuryError::SameAccount(account).into());
            }
        }

        Ok(Self {
            engine: RiskPolicyEngine::new(config),
            ledger,
            advisor: None,
            requests: DashMap::new(),
            disbursement_account,
            repayment_source,
        })
    }

    /// Attaches an advisory provider. Advisory text is annotation only; it
    /// never gates or alters the binding decision.
    #[must_use]
    pub fn with_advisor(mut self, advisor: Box<dyn AdvisoryProvider + Send + Sync>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Returns the embedded policy engine.
    #[must_use]
    pub const fn engine(&self) -> &RiskPolicyEngine {
        &self.engine
    }

    /// Returns the shared treasury ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Submits an application: evaluates it, persists the resulting request
    /// and, on approval, disburses against pooled client funds.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Treasury` if the disbursement posting fails; in
    /// that case no request is persisted.
    pub fn submit(&self, snapshot: ApplicationSnapshot) -> Result<CreditRequest, CreditError> {
        let mut decision = self.engine.evaluate(&snapshot);
        if let Some(advisor) = &self.advisor {
            decision.advisory = advisor.advise(&snapshot);
        }

        let id = CreditRequestId::new();
        let mut status = Self::advance(RequestStatus::Submitted, decision.status.into())?;

        if decision.status == DecisionStatus::Approved {
            // The credit is disbursed against pooled client funds for the
            // purchase amount, settling on the merchant acquiring side.
            self.ledger.post_resolved(
                TreasuryAccount::ClientFunds,
                self.disbursement_account,
                snapshot.amount,
                &format!(
                    "disbursement for credit request {id} to merchant {}",
                    snapshot.merchant_id
                ),
            )?;
            status = Self::advance(status, RequestStatus::Active)?;
        }

        let now = Utc::now();
        let request = CreditRequest {
            id,
            applicant_id: snapshot.applicant_id,
            merchant_id: snapshot.merchant_id,
            amount: snapshot.amount,
            status,
            decision_rule: decision.rule,
            decision_reason: decision.reason,
            advisory: decision.advisory,
            plan: decision.plan,
            snapshot,
            repaid: 0,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        };

        info!(
            request_id = %id,
            applicant_id = %request.applicant_id,
            status = %request.status,
            rule = request.decision_rule.as_str(),
            amount = request.amount,
            "credit request submitted"
        );

        self.requests.insert(id, request.clone());
        Ok(request)
    }

    /// Applies a repayment to an active or partially repaid request.
    ///
    /// Posts the repayment movement, increments the repaid amount, and
    /// closes the request once the plan total is fully repaid.
    ///
    /// # Errors
    ///
    /// Returns `CreditError` if the request is unknown, the amount is not
    /// positive, the status does not accept repayments, or the amount
    /// exceeds the outstanding balance. On error nothing is mutated.
    pub fn repay(
        &self,
        request_id: CreditRequestId,
        amount: MinorUnits,
    ) -> Result<CreditRequest, CreditError> {
        let mut entry = self
            .requests
            .get_mut(&request_id)
            .ok_or(CreditError::RequestNotFound(request_id))?;

        if amount <= 0 {
            return Err(CreditError::NonPositiveRepayment(amount));
        }
        if !entry.status.accepts_repayment() {
            return Err(CreditError::RepaymentNotAllowed {
                status: entry.status,
            });
        }
        let outstanding = entry.outstanding();
        if amount > outstanding {
            return Err(CreditError::ExcessiveRepayment {
                amount,
                outstanding,
            });
        }

        let next = if amount == outstanding {
            RequestStatus::Closed
        } else {
            RequestStatus::PartiallyRepaid
        };
        if entry.status != next && !entry.status.can_transition(next) {
            return Err(CreditError::InvalidTransition {
                from: entry.status,
                to: next,
            });
        }

        // All validations passed; the posting is the only fallible step left.
        self.ledger.post_resolved(
            self.repayment_source,
            TreasuryAccount::ClientFunds,
            amount,
            &format!("repayment for credit request {request_id}"),
        )?;

        entry.repaid += amount;
        entry.status = next;
        entry.updated_at = Utc::now();

        info!(
            request_id = %request_id,
            amount,
            repaid = entry.repaid,
            outstanding = entry.outstanding(),
            status = %entry.status,
            "repayment applied"
        );

        Ok(entry.clone())
    }

    /// Resolves a request held for review, by an authorized reviewer.
    ///
    /// The only allowed manual transition: `Review → Approved` (computes the
    /// plan from the retained snapshot and disburses) or `Review → Rejected`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidTransition` unless the request is in
    /// `Review` and the outcome is approve or reject; schedule or posting
    /// failures leave the request in `Review` untouched.
    pub fn override_status(
        &self,
        request_id: CreditRequestId,
        outcome: DecisionStatus,
        reviewer_id: ReviewerId,
    ) -> Result<CreditRequest, CreditError> {
        let mut entry = self
            .requests
            .get_mut(&request_id)
            .ok_or(CreditError::RequestNotFound(request_id))?;

        let target = RequestStatus::from(outcome);
        if entry.status != RequestStatus::Review || !entry.status.can_transition(target) {
            return Err(CreditError::InvalidTransition {
                from: entry.status,
                to: target,
            });
        }

        match outcome {
            DecisionStatus::Approved => {
                // Compute the plan before touching any state, so a failure
                // leaves the request in Review.
                let plan = self.engine.compute_plan(&entry.snapshot)?;
                self.ledger.post_resolved(
                    TreasuryAccount::ClientFunds,
                    self.disbursement_account,
                    entry.amount,
                    &format!(
                        "disbursement for credit request {request_id} to merchant {}",
                        entry.merchant_id
                    ),
                )?;
                entry.plan = Some(plan);
                entry.status = Self::advance(
                    Self::advance(entry.status, RequestStatus::Approved)?,
                    RequestStatus::Active,
                )?;
            }
            DecisionStatus::Rejected | DecisionStatus::Review => {
                entry.status = Self::advance(entry.status, target)?;
            }
        }

        entry.reviewed_by = Some(reviewer_id);
        entry.updated_at = Utc::now();

        info!(
            request_id = %request_id,
            reviewer_id = %reviewer_id,
            status = %entry.status,
            "review override applied"
        );

        Ok(entry.clone())
    }

    /// Returns a request by ID.
    #[must_use]
    pub fn request(&self, request_id: CreditRequestId) -> Option<CreditRequest> {
        self.requests
            .get(&request_id)
            .map(|entry| entry.value().clone())
    }

    /// Returns all requests for an applicant, oldest first.
    #[must_use]
    pub fn requests_for_applicant(&self, applicant_id: ApplicantId) -> Vec<CreditRequest> {
        let mut requests: Vec<CreditRequest> = self
            .requests
            .iter()
            .filter(|entry| entry.applicant_id == applicant_id)
            .map(|entry| entry.value().clone())
            .collect();
        requests.sort_by_key(|request| request.created_at);
        requests
    }

    /// Number of requests the manager owns.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Validates and applies one state-machine step.
    fn advance(from: RequestStatus, to: RequestStatus) -> Result<RequestStatus, CreditError> {
        if from.can_transition(to) {
            Ok(to)
        } else {
            Err(CreditError::InvalidTransition { from, to })
        }
    }
}
