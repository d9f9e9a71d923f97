//! Shared primitives: core value types, error taxonomy, numeric helpers.

/// Core value types (colors, kurbo re-exports).
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
/// Numeric and hashing helpers.
pub(crate) mod math;
