//! Credit request lifecycle management.
//!
//! This module orchestrates the policy engine, the calculator and the
//! treasury ledger:
//! - Credit request entities and their status state machine
//! - Submission, repayment and reviewer override operations
//! - Disbursement and repayment postings against the treasury ledger
//! - Error types for lifecycle operations

pub mod error;
pub mod manager;
pub mod types;


pub use error::CreditError;
pub use manager::CreditLifecycleManager;
pub use types::{CreditRequest, RequestStatus};
