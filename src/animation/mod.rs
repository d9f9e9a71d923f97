//! Easing functions and per-attribute easing resolution.

/// Easing function catalog.
pub mod ease;
/// Priority-ordered per-attribute easing resolution.
pub mod easing_resolver;
