//! Property-based tests for RiskPolicyEngine.
//!
//! Feature: risk-core
//! - Property 1: Evaluation Is Pure
//! - Property 2: Plans Appear Exactly On Approval

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::config::PolicyConfig;
use super::engine::RiskPolicyEngine;
use super::types::{
    ApplicationSnapshot, DecisionStatus, FinancingKind, PastTransaction, TransactionKind,
};
use crate::schedule::Periodicity;
use tayseer_shared::{ApplicantId, MerchantId};

/// Strategy to generate a transaction kind.
fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Received),
        Just(TransactionKind::Sent),
        Just(TransactionKind::Payment),
        Just(TransactionKind::Fee),
    ]
}

/// Strategy to generate a past-transaction history (0 to 12 entries).
fn history_strategy() -> impl Strategy<Value = Vec<PastTransaction>> {
    prop::collection::vec(
        (kind_strategy(), -50_000i64..50_000i64, 0u32..365u32).prop_map(
            |(kind, amount, day)| PastTransaction {
                amount,
                kind,
                timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
                    + chrono::Days::new(u64::from(day)),
            },
        ),
        0..12,
    )
}

/// Strategy to generate an application snapshot with a fixed identity.
///
/// Identity fields are pinned so that two generated snapshots with the same
/// seed are identical, which is what the purity property needs.
fn snapshot_strategy() -> impl Strategy<Value = ApplicationSnapshot> {
    (
        1i64..3_000_000i64,
        prop_oneof![
            Just(FinancingKind::InstallmentPurchase),
            Just(FinancingKind::Mourabaha),
        ],
        0i64..2_000_000i64,
        history_strategy(),
        1u32..=36u32,
        prop_oneof![
            Just(Periodicity::Daily),
            Just(Periodicity::Weekly),
            Just(Periodicity::Monthly),
        ],
        proptest::option::of((0i64..8_000i64).prop_map(|v| Decimal::new(v, 2))),
    )
        .prop_map(
            |(amount, financing, balance, history, duration_units, periodicity, margin)| {
                ApplicationSnapshot {
                    applicant_id: ApplicantId::from_uuid(uuid::Uuid::nil()),
                    merchant_id: MerchantId::from_uuid(uuid::Uuid::nil()),
                    amount,
                    financing,
                    purpose: None,
                    balance,
                    history,
                    duration_units,
                    periodicity,
                    first_due_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                    margin_rate_pct: margin,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// **Property 1: Evaluation Is Pure**
    ///
    /// *For any* snapshot, evaluating twice against the same policy yields
    /// an identical decision.
    #[test]
    fn prop_evaluation_is_pure(snapshot in snapshot_strategy()) {
        let engine = RiskPolicyEngine::new(PolicyConfig::default());
        prop_assert_eq!(engine.evaluate(&snapshot), engine.evaluate(&snapshot));
    }

    /// **Property 2: Plans Appear Exactly On Approval**
    ///
    /// *For any* snapshot, an approved decision carries a plan covering the
    /// requested amount over the requested duration; any other decision
    /// carries no plan.
    #[test]
    fn prop_plan_presence_matches_status(snapshot in snapshot_strategy()) {
        let engine = RiskPolicyEngine::new(PolicyConfig::default());
        let decision = engine.evaluate(&snapshot);
        match decision.status {
            DecisionStatus::Approved => {
                let plan = decision.plan.expect("approved carries a plan");
                prop_assert_eq!(plan.len(), snapshot.duration_units as usize);
                prop_assert_eq!(plan.total_principal(), snapshot.amount);
            }
            DecisionStatus::Rejected | DecisionStatus::Review => {
                prop_assert!(decision.plan.is_none());
            }
        }
    }

    /// **Property 3: Batch Equals Pointwise Evaluation**
    ///
    /// *For any* set of snapshots, the parallel batch yields the same
    /// decisions as evaluating one by one.
    #[test]
    fn prop_batch_equals_pointwise(
        snapshots in prop::collection::vec(snapshot_strategy(), 0..8),
    ) {
        let engine = RiskPolicyEngine::new(PolicyConfig::default());
        let batch = engine.evaluate_batch(&snapshots);
        let pointwise: Vec<_> = snapshots.iter().map(|s| engine.evaluate(s)).collect();
        prop_assert_eq!(batch, pointwise);
    }
}
