//! The deterministic risk policy engine.
//!
//! Evaluation is a pure function of the snapshot and the configured policy.
//! Rules are checked in a fixed priority order and the first matching rule
//! wins; ties are resolved by that order, never by rule magnitude.

use rayon::prelude::*;
use rust_decimal::Decimal;

use super::config::PolicyConfig;
use super::types::{ApplicationSnapshot, Decision, FinancingKind, RiskRule};
use crate::schedule::{
    AmortizationCalculator, RepaymentPlan, ScheduleError, ScheduleMode, ScheduleParams,
};

/// Priority-ordered rule engine producing binding credit decisions.
#[derive(Debug, Clone)]
pub struct RiskPolicyEngine {
    config: PolicyConfig,
}

impl RiskPolicyEngine {
    /// Creates an engine over the given policy.
    #[must_use]
    pub const fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Returns the policy the engine was built with.
    #[must_use]
    pub const fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Evaluates one application snapshot.
    ///
    /// Pure and side-effect-free: identical snapshot and policy always yield
    /// an identical decision.
    #[must_use]
    pub fn evaluate(&self, snapshot: &ApplicationSnapshot) -> Decision {
        let t = &self.config.thresholds;
        let product = self.config.product(snapshot.financing);
        let amount = snapshot.amount;
        let history_len = snapshot.history.len();

        // Rule 1: new user asking beyond the new-user maximum.
        if history_len < t.min_history_transactions && amount > t.reject_max_for_new_user {
            return Decision::rejected(
                RiskRule::NewUserExcess,
                "insufficient history for requested amount",
            );
        }

        // Rule 2: no history at all.
        if history_len == 0 {
            return Decision::rejected(RiskRule::NoHistory, "no transaction history");
        }

        // Rule 3: auto-approval. Unusual financing terms always go through
        // a human, however clean the profile.
        let balance_covers = Decimal::from(snapshot.balance)
            >= t.min_current_balance_ratio * Decimal::from(amount);
        if amount <= t.auto_approve_max
            && history_len >= t.min_history_transactions
            && snapshot.has_income_entry()
            && balance_covers
            && !self.has_unusual_terms(snapshot)
        {
            return match self.compute_plan(snapshot) {
                Ok(plan) => Decision::approved(plan),
                // Terms that cannot produce a serviceable schedule go to a
                // human instead of failing the evaluation.
                Err(_) => Decision::review(
                    RiskRule::UnusualTerms,
                    "financing terms do not produce a serviceable schedule",
                ),
            };
        }

        // Rule 4: hard per-product ceiling.
        if amount > product.ceiling {
            return Decision::rejected(RiskRule::ExcessiveAmount, "amount exceeds product ceiling");
        }

        // Rule 5: everything else is a review; name the first applicable
        // borderline condition: amount band, thin history, unusual terms.
        if amount > t.auto_approve_max || amount >= t.review_amount_floor {
            return Decision::review(
                RiskRule::AmountBand,
                "amount above auto-approval threshold requires manual review",
            );
        }

        if history_len < t.min_history_transactions
            || !snapshot.has_income_entry()
            || !balance_covers
        {
            return Decision::review(
                RiskRule::ThinHistory,
                "transaction history or balance coverage too thin for auto-approval",
            );
        }

        // A clean profile can only land here through its terms.
        Decision::review(
            RiskRule::UnusualTerms,
            "unusual financing terms require manual review",
        )
    }

    /// Evaluates a batch of snapshots in parallel.
    ///
    /// Decisions are pure, so evaluation fans out freely; the output order
    /// matches the input order.
    #[must_use]
    pub fn evaluate_batch(&self, snapshots: &[ApplicationSnapshot]) -> Vec<Decision> {
        snapshots.par_iter().map(|s| self.evaluate(s)).collect()
    }

    /// Computes the repayment plan for a snapshot under the product's mode
    /// and rate: flat profit at the snapshot margin (or the product default)
    /// for Mourabaha, amortizing at the product rate for BNPL.
    pub fn compute_plan(
        &self,
        snapshot: &ApplicationSnapshot,
    ) -> Result<RepaymentPlan, ScheduleError> {
        let product = self.config.product(snapshot.financing);
        let (mode, annual_rate_pct) = match snapshot.financing {
            FinancingKind::Mourabaha => (
                ScheduleMode::FlatProfit,
                snapshot.margin_rate_pct.unwrap_or(product.annual_rate_pct),
            ),
            FinancingKind::InstallmentPurchase => {
                (ScheduleMode::Amortizing, product.annual_rate_pct)
            }
        };

        AmortizationCalculator::compute_schedule(&ScheduleParams {
            principal: snapshot.amount,
            duration_units: snapshot.duration_units,
            periodicity: snapshot.periodicity,
            annual_rate_pct,
            first_due_date: snapshot.first_due_date,
            mode,
        })
    }

    /// Returns true if the snapshot carries unusual financing terms: a
    /// Mourabaha margin outside the normal band, or a repayment window of at
    /// most one period for an amount at or above the review floor.
    #[must_use]
    pub fn has_unusual_terms(&self, snapshot: &ApplicationSnapshot) -> bool {
        let product = self.config.product(snapshot.financing);
        let unusual_margin = snapshot.financing == FinancingKind::Mourabaha
            && snapshot
                .margin_rate_pct
                .is_some_and(|m| m < product.margin_min_pct || m > product.margin_max_pct);
        let short_window = snapshot.duration_units <= 1
            && snapshot.amount >= self.config.thresholds.review_amount_floor;
        unusual_margin || short_window
    }
}
