//! Deterministic credit risk policy.
//!
//! This module implements the binding decision layer:
//! - Application snapshots and decision types
//! - Configurable policy thresholds and per-product policies
//! - The priority-ordered rule engine (first matching rule wins)
//!
//! Decisioning is pure and side-effect-free; the optional advisory text
//! produced elsewhere never alters a decision.

pub mod config;
pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use config::{PolicyConfig, ProductPolicy, RiskThresholds, SettlementConfig};
pub use engine::RiskPolicyEngine;
pub use types::{
    ApplicationSnapshot, Decision, DecisionStatus, FinancingKind, PastTransaction, RiskRule,
    TransactionKind,
};
