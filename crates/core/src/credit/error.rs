//! Credit lifecycle error types.

use thiserror::Error;

use tayseer_shared::{CreditRequestId, MinorUnits};

use super::types::RequestStatus;
use crate::schedule::ScheduleError;
use crate::treasury::TreasuryError;

/// Errors that can occur during credit lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreditError {
    /// No request exists under the given ID.
    #[error("Credit request not found: {0}")]
    RequestNotFound(CreditRequestId),

    /// Repayment amount must be strictly positive.
    #[error("Repayment amount must be positive, got {0}")]
    NonPositiveRepayment(MinorUnits),

    /// Only active or partially repaid requests accept repayments.
    #[error("Request in status {status} does not accept repayments")]
    RepaymentNotAllowed {
        /// The request's current status.
        status: RequestStatus,
    },

    /// Repayment would exceed the outstanding balance.
    #[error("Repayment of {amount} exceeds outstanding balance {outstanding}")]
    ExcessiveRepayment {
        /// The attempted repayment amount.
        amount: MinorUnits,
        /// The outstanding balance.
        outstanding: MinorUnits,
    },

    /// The requested status transition is not allowed.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The request's current status.
        from: RequestStatus,
        /// The requested status.
        to: RequestStatus,
    },

    /// Schedule computation failed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Treasury posting failed.
    #[error(transparent)]
    Treasury(#[from] TreasuryError),
}

impl CreditError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::RequestNotFound(_) => "REQUEST_NOT_FOUND",
            Self::NonPositiveRepayment(_)
            | Self::RepaymentNotAllowed { .. }
            | Self::ExcessiveRepayment { .. } => "INVALID_REPAYMENT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Schedule(err) => err.error_code(),
            Self::Treasury(err) => err.error_code(),
        }
    }
}
