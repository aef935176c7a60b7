//! Treasury error types for movement validation.

use thiserror::Error;

use tayseer_shared::MinorUnits;

use super::types::TreasuryAccount;

/// Errors that can occur while posting a fund movement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreasuryError {
    /// Movement amount must be strictly positive.
    #[error("Movement amount must be positive, got {0}")]
    NonPositiveAmount(MinorUnits),

    /// Source and destination must differ.
    #[error("Movement source and destination are both {0}")]
    SameAccount(TreasuryAccount),

    /// The name did not resolve to a treasury account.
    #[error("Unknown treasury account: {0}")]
    UnknownAccount(String),
}

impl TreasuryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) | Self::SameAccount(_) => "INVALID_MOVEMENT",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
        }
    }
}
