//! Schedule error types for parameter validation.

use thiserror::Error;

use tayseer_shared::MinorUnits;

/// Errors that can occur while computing a repayment schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// Principal must be strictly positive.
    #[error("Principal must be positive, got {0}")]
    NonPositivePrincipal(MinorUnits),

    /// Duration must be at least one installment.
    #[error("Duration must be at least one installment")]
    ZeroDuration,

    /// Rate cannot be negative.
    #[error("Annual rate cannot be negative, got {0}%")]
    NegativeRate(rust_decimal::Decimal),

    /// An intermediate amount left the representable minor-unit range.
    #[error("Amount out of range for minor currency units")]
    AmountOutOfRange,

    /// A due date fell outside the representable calendar range.
    #[error("Due date out of calendar range")]
    DueDateOutOfRange,
}

impl ScheduleError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositivePrincipal(_)
            | Self::ZeroDuration
            | Self::NegativeRate(_)
            | Self::AmountOutOfRange
            | Self::DueDateOutOfRange => "INVALID_SCHEDULE_PARAMETERS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_all_variants_share_one_error_code() {
        for err in [
            ScheduleError::NonPositivePrincipal(0),
            ScheduleError::ZeroDuration,
            ScheduleError::NegativeRate(dec!(-1)),
            ScheduleError::AmountOutOfRange,
            ScheduleError::DueDateOutOfRange,
        ] {
            assert_eq!(err.error_code(), "INVALID_SCHEDULE_PARAMETERS");
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ScheduleError::NonPositivePrincipal(-5).to_string(),
            "Principal must be positive, got -5"
        );
        assert_eq!(
            ScheduleError::NegativeRate(dec!(-2.5)).to_string(),
            "Annual rate cannot be negative, got -2.5%"
        );
    }
}
