//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{MinorUnits, to_minor_units_ceil, to_minor_units_half_up};
