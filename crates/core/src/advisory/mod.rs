//! Non-binding advisory annotations.
//!
//! The advisory layer is an external collaborator (typically a language
//! model). It may annotate a decision with a suggestion string; it can never
//! alter the binding status, reason or plan produced by the policy engine.

use crate::risk::ApplicationSnapshot;

/// Source of optional advisory text for a decision.
///
/// Implementations must treat the call as fire-and-forget: returning `None`
/// (or cheaply swallowing an internal failure) is always acceptable, and the
/// caller never blocks a decision on it.
pub trait AdvisoryProvider {
    /// Produces advisory text for the given snapshot, if any.
    fn advise(&self, snapshot: &ApplicationSnapshot) -> Option<String>;
}

/// Provider that never advises. The default when no advisory layer is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdvisory;

impl AdvisoryProvider for NoAdvisory {
    fn advise(&self, _snapshot: &ApplicationSnapshot) -> Option<String> {
        None
    }
}
