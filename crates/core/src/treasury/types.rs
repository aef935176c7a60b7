//! Treasury domain types: the closed account set and fund movements.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use tayseer_shared::{MinorUnits, MovementId};

use super::error::TreasuryError;

/// The fixed chart of treasury accounts.
///
/// A closed enum instead of free-text names: account resolution is a
/// constant lookup and a typo fails fast instead of misposting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TreasuryAccount {
    /// The institution's own capital.
    OwnFunds,
    /// Pooled client funds; credit is disbursed against this pool.
    ClientFunds,
    /// Reserve account at the central bank.
    CentralBank,
    /// Settlement accounts at commercial banks.
    CommercialBanks,
    /// Float held with mobile money operators.
    MobileMoneyOperators,
    /// Nostro accounts with foreign correspondents.
    ForeignCorrespondents,
    /// Pseudo-account for external funding and withdrawal; exempt from the
    /// conservation invariant.
    External,
}

/// Lookup table from normalized names to accounts.
static ACCOUNT_NAMES: Lazy<HashMap<String, TreasuryAccount>> = Lazy::new(|| {
    TreasuryAccount::ALL
        .iter()
        .map(|account| (normalize(account.as_str()), *account))
        .collect()
});

/// Normalization for account-name resolution: case, spaces, underscores and
/// hyphens are not significant.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl TreasuryAccount {
    /// Every treasury account, in posting-lock order.
    pub const ALL: [Self; 7] = [
        Self::OwnFunds,
        Self::ClientFunds,
        Self::CentralBank,
        Self::CommercialBanks,
        Self::MobileMoneyOperators,
        Self::ForeignCorrespondents,
        Self::External,
    ];

    /// Returns the string representation of the account.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OwnFunds => "own_funds",
            Self::ClientFunds => "client_funds",
            Self::CentralBank => "central_bank",
            Self::CommercialBanks => "commercial_banks",
            Self::MobileMoneyOperators => "mobile_money_operators",
            Self::ForeignCorrespondents => "foreign_correspondents",
            Self::External => "external",
        }
    }

    /// Stable index into the per-account lock table.
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns true for the conservation-exempt pseudo-account.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External)
    }

    /// Resolves a free-text name against the closed account set.
    ///
    /// Matching ignores case, spaces, underscores and hyphens, so
    /// `"ClientFunds"`, `"client funds"` and `"CLIENT_FUNDS"` all resolve.
    ///
    /// # Errors
    ///
    /// Returns `TreasuryError::UnknownAccount` when nothing matches.
    pub fn resolve(name: &str) -> Result<Self, TreasuryError> {
        ACCOUNT_NAMES
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| TreasuryError::UnknownAccount(name.to_string()))
    }
}

impl std::fmt::Display for TreasuryAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Balance of one treasury account at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Signed balance in minor units.
    pub balance: MinorUnits,
    /// Flagged when the balance is negative. A funding shortfall is a
    /// business event, not a posting error.
    pub overdrawn: bool,
}

impl AccountBalance {
    /// Creates a balance snapshot, deriving the overdrawn flag.
    #[must_use]
    pub const fn new(balance: MinorUnits) -> Self {
        Self {
            balance,
            overdrawn: balance < 0,
        }
    }
}

/// Movement status. Postings are atomic; no partial states are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementStatus {
    /// The movement has been applied.
    Completed,
}

/// An immutable, append-only fund movement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerMovement {
    /// Unique identifier.
    pub id: MovementId,
    /// When the movement was posted.
    pub timestamp: DateTime<Utc>,
    /// Debited account.
    pub from: TreasuryAccount,
    /// Credited account.
    pub to: TreasuryAccount,
    /// Amount moved, always positive.
    pub amount: MinorUnits,
    /// Free-text description.
    pub description: String,
    /// Movement status.
    pub status: MovementStatus,
}

/// Input for posting a movement with free-text account names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementInput {
    /// Source account name, resolved against the closed set.
    pub from: String,
    /// Destination account name, resolved against the closed set.
    pub to: String,
    /// Amount to move, in minor units.
    pub amount: MinorUnits,
    /// Free-text description.
    pub description: String,
}
