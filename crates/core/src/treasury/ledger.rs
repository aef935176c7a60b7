//! The treasury ledger: balances plus an append-only movement log.
//!
//! Every movement debits one account and credits another inside the same
//! fixed pool, so the sum of all non-`External` balances is invariant across
//! any posting sequence. Postings that share an account are serialized by
//! per-account locks acquired in fixed index order; disjoint pairs proceed
//! concurrently.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, warn};

use tayseer_shared::{MinorUnits, MovementId};

use super::error::TreasuryError;
use super::types::{
    AccountBalance, LedgerMovement, MovementInput, MovementStatus, TreasuryAccount,
};

const ACCOUNT_COUNT: usize = TreasuryAccount::ALL.len();

/// Mutable treasury state over the fixed chart of accounts.
///
/// The ledger exclusively owns account balances and the movement log; no
/// other component mutates balances directly.
#[derive(Debug)]
pub struct Ledger {
    balances: [Mutex<MinorUnits>; ACCOUNT_COUNT],
    movements: Mutex<Vec<LedgerMovement>>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates a ledger with all balances at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: std::array::from_fn(|_| Mutex::new(0)),
            movements: Mutex::new(Vec::new()),
        }
    }

    /// Creates a ledger seeded with opening balances.
    ///
    /// Seeding is posted as ordinary movements against `External`, so the
    /// movement log is complete and conservation over internal accounts
    /// still holds.
    ///
    /// # Errors
    ///
    /// Returns `TreasuryError` if an entry names `External` itself.
    pub fn with_opening_balances(
        entries: impl IntoIterator<Item = (TreasuryAccount, MinorUnits)>,
    ) -> Result<Self, TreasuryError> {
        let ledger = Self::new();
        for (account, amount) in entries {
            match amount {
                0 => {}
                a if a > 0 => {
                    ledger.post_resolved(TreasuryAccount::External, account, a, "opening balance")?;
                }
                a => {
                    ledger.post_resolved(
                        account,
                        TreasuryAccount::External,
                        -a,
                        "opening balance",
                    )?;
                }
            }
        }
        Ok(ledger)
    }

    /// Posts a movement given free-text account names.
    ///
    /// # Errors
    ///
    /// Returns `TreasuryError::UnknownAccount` if a name does not resolve,
    /// or the validation errors of [`Ledger::post_resolved`].
    pub fn post(&self, input: &MovementInput) -> Result<LedgerMovement, TreasuryError> {
        let from = TreasuryAccount::resolve(&input.from)?;
        let to = TreasuryAccount::resolve(&input.to)?;
        self.post_resolved(from, to, input.amount, &input.description)
    }

    /// Posts a movement between two resolved accounts.
    ///
    /// Atomically debits `from` and credits `to` under both account locks,
    /// appends the immutable movement record, and returns it. Either the
    /// whole posting applies or nothing does.
    ///
    /// # Errors
    ///
    /// Returns `TreasuryError::NonPositiveAmount` or
    /// `TreasuryError::SameAccount` on validation failure.
    pub fn post_resolved(
        &self,
        from: TreasuryAccount,
        to: TreasuryAccount,
        amount: MinorUnits,
        description: &str,
    ) -> Result<LedgerMovement, TreasuryError> {
        if amount <= 0 {
            return Err(TreasuryError::NonPositiveAmount(amount));
        }
        if from == to {
            return Err(TreasuryError::SameAccount(from));
        }

        let movement = LedgerMovement {
            id: MovementId::new(),
            timestamp: Utc::now(),
            from,
            to,
            amount,
            description: description.to_string(),
            status: MovementStatus::Completed,
        };

        // Lock both accounts in fixed index order; postings sharing an
        // account are strictly sequenced, disjoint pairs run concurrently.
        let (lo, hi) = if from.index() < to.index() {
            (from.index(), to.index())
        } else {
            (to.index(), from.index())
        };
        let lo_guard = self.balance_guard(lo);
        let hi_guard = self.balance_guard(hi);
        let (mut from_guard, mut to_guard) = if from.index() == lo {
            (lo_guard, hi_guard)
        } else {
            (hi_guard, lo_guard)
        };

        *from_guard -= amount;
        *to_guard += amount;

        if *from_guard < 0 && !from.is_external() {
            warn!(account = %from, balance = *from_guard, "treasury account overdrawn");
        }

        // The log lock is always taken after the balance locks, so the log
        // order matches the application order on shared accounts.
        self.movements_guard().push(movement.clone());

        debug!(
            movement_id = %movement.id,
            from = %from,
            to = %to,
            amount,
            "movement posted"
        );

        Ok(movement)
    }

    /// Snapshot of all account balances, overdrawn accounts flagged.
    ///
    /// Read-after-write consistent: reflects the latest posted state.
    #[must_use]
    pub fn balances(&self) -> BTreeMap<TreasuryAccount, AccountBalance> {
        TreasuryAccount::ALL
            .iter()
            .map(|account| {
                let balance = *self.balance_guard(account.index());
                (*account, AccountBalance::new(balance))
            })
            .collect()
    }

    /// Current balance of one account.
    #[must_use]
    pub fn balance_of(&self, account: TreasuryAccount) -> MinorUnits {
        *self.balance_guard(account.index())
    }

    /// Sum of all non-`External` balances; invariant across postings that
    /// do not touch `External`.
    #[must_use]
    pub fn internal_total(&self) -> MinorUnits {
        TreasuryAccount::ALL
            .iter()
            .filter(|account| !account.is_external())
            .map(|account| *self.balance_guard(account.index()))
            .sum()
    }

    /// The movement log, newest first.
    #[must_use]
    pub fn movements(&self) -> Vec<LedgerMovement> {
        let log = self.movements_guard();
        log.iter().rev().cloned().collect()
    }

    /// Number of posted movements.
    #[must_use]
    pub fn movement_count(&self) -> usize {
        self.movements_guard().len()
    }

    fn balance_guard(&self, index: usize) -> MutexGuard<'_, MinorUnits> {
        // A poisoned lock still holds consistent state: both writes of a
        // posting happen under both locks with no panic point between them.
        self.balances[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn movements_guard(&self) -> MutexGuard<'_, Vec<LedgerMovement>> {
        self.movements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
