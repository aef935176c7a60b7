//! Treasury fund-movement ledger.
//!
//! This module implements the institutional treasury view:
//! - The closed chart of treasury accounts
//! - Append-only fund movements with conservation checks
//! - Per-account sequencing for concurrent postings
//! - Error types for movement validation

pub mod error;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod ledger_props;

pub use error::TreasuryError;
pub use ledger::Ledger;
pub use types::{AccountBalance, LedgerMovement, MovementInput, MovementStatus, TreasuryAccount};
