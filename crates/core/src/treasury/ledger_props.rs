//! Property-based tests for the treasury ledger.
//!
//! Feature: treasury-core
//! - Property 1: Conservation Over Internal Accounts
//! - Property 2: Log Length Equals Successful Postings
//! - Property 3: Double-Entry Symmetry

use proptest::prelude::*;

use super::ledger::Ledger;
use super::types::TreasuryAccount;

/// Strategy to generate any treasury account.
fn account_strategy() -> impl Strategy<Value = TreasuryAccount> + Clone {
    prop::sample::select(TreasuryAccount::ALL.to_vec())
}

/// Strategy to generate an internal (non-External) account.
fn internal_account_strategy() -> impl Strategy<Value = TreasuryAccount> + Clone {
    prop::sample::select(
        TreasuryAccount::ALL
            .iter()
            .copied()
            .filter(|a| !a.is_external())
            .collect::<Vec<_>>(),
    )
}

/// Strategy to generate a posting: (from, to, amount).
fn posting_strategy(
    accounts: impl Strategy<Value = TreasuryAccount> + Clone,
) -> impl Strategy<Value = (TreasuryAccount, TreasuryAccount, i64)> {
    (accounts.clone(), accounts, 1i64..10_000_000i64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// **Property 1: Conservation Over Internal Accounts**
    ///
    /// *For any* sequence of postings between internal accounts, the sum of
    /// all internal balances is unchanged.
    #[test]
    fn prop_internal_postings_conserve_total(
        postings in prop::collection::vec(posting_strategy(internal_account_strategy()), 0..40),
    ) {
        let ledger = Ledger::new();
        let before = ledger.internal_total();

        for (from, to, amount) in postings {
            // Same-account pairs are rejected and must not change state.
            let _ = ledger.post_resolved(from, to, amount, "prop posting");
        }

        prop_assert_eq!(ledger.internal_total(), before);
    }

    /// **Property 2: Log Length Equals Successful Postings**
    ///
    /// *For any* posting sequence, exactly the successful postings appear in
    /// the log, newest first.
    #[test]
    fn prop_log_matches_successful_postings(
        postings in prop::collection::vec(posting_strategy(account_strategy()), 0..40),
    ) {
        let ledger = Ledger::new();
        let mut succeeded = 0usize;

        for (from, to, amount) in postings {
            if ledger.post_resolved(from, to, amount, "prop posting").is_ok() {
                succeeded += 1;
            }
        }

        let log = ledger.movements();
        prop_assert_eq!(log.len(), succeeded);
        for window in log.windows(2) {
            prop_assert!(window[0].timestamp >= window[1].timestamp);
        }
    }

    /// **Property 3: Double-Entry Symmetry**
    ///
    /// *For any* posting sequence (External included), every account balance
    /// equals its credits minus its debits replayed from the log.
    #[test]
    fn prop_balances_replay_from_log(
        postings in prop::collection::vec(posting_strategy(account_strategy()), 0..40),
    ) {
        let ledger = Ledger::new();
        for (from, to, amount) in postings {
            let _ = ledger.post_resolved(from, to, amount, "prop posting");
        }

        let mut replayed = std::collections::BTreeMap::new();
        for movement in ledger.movements() {
            *replayed.entry(movement.from).or_insert(0i64) -= movement.amount;
            *replayed.entry(movement.to).or_insert(0i64) += movement.amount;
        }

        for (account, balance) in ledger.balances() {
            prop_assert_eq!(
                balance.balance,
                replayed.get(&account).copied().unwrap_or(0),
                "account {} diverged from its log replay", account
            );
        }
    }
}
